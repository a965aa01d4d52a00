//! Text rewriting behind `/rewrite`.
//!
//! Only the identity rewriter exists today. A model-backed rewriter plugs in
//! by implementing [`Rewriter`] and handing it to the gateway state.

/// Transforms a block of text.
pub trait Rewriter: Send + Sync {
    fn rewrite(&self, text: &str) -> String;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRewriter;

impl Rewriter for PassthroughRewriter {
    fn rewrite(&self, text: &str) -> String {
        text.to_string()
    }
}
