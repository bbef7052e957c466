//! Text encoding seam between the engine and the document format.

use crate::node::Node;

/// Serialises a node tree to the document's textual form.
pub trait Encoder {
    type Error;

    fn encode(&self, node: &Node) -> Result<String, Self::Error>;
}

/// Text printed for a value produced by a read.
///
/// Containers go through `encoder`; scalars print their plain form.
pub fn render_read<E: Encoder>(value: &Node, encoder: &E) -> Result<String, E::Error> {
    if value.is_container() {
        encoder.encode(value)
    } else {
        Ok(value.to_string())
    }
}
