//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with the [`Render`] enum. The engine
//! sorts every flow's render into a lit batch and a sky batch, then draws the
//! lit batch with the scene pipeline and the sky batch last.

use wgpu::RenderPass;

use crate::{
    context::Context,
    data_structures::model::{DrawModel, Model},
};

/// One model together with the instance buffer holding its placement.
#[derive(Clone, Copy, Debug)]
pub struct Drawn<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
}

/// Specifies how a flow's objects should be rendered.
///
/// - `None` renders nothing
/// - `Lit(Drawn)` renders a single object with the lit scene pipeline
/// - `Lits(Vec<Drawn>)` renders a batch of lit objects
/// - `Sky(Drawn)` renders the background, after all lit objects
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
#[derive(Debug)]
pub enum Render<'a> {
    None,
    Lit(Drawn<'a>),
    Lits(Vec<Drawn<'a>>),
    Sky(Drawn<'a>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Flattens `self` into the lit and sky batches, keeping the order in
    /// which objects were listed.
    pub fn set_pipelines(self, lits: &mut Vec<Drawn<'a>>, skies: &mut Vec<Drawn<'a>>) {
        match self {
            Render::Lit(drawn) => lits.push(drawn),
            Render::Lits(mut vec) => lits.append(&mut vec),
            Render::Sky(drawn) => skies.push(drawn),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(lits, skies)),
            Render::None => (),
        }
    }
}

/// Records the draw calls of both batches into `render_pass`.
pub(crate) fn draw_batches(
    ctx: &Context,
    render_pass: &mut RenderPass<'_>,
    lits: &[Drawn<'_>],
    skies: &[Drawn<'_>],
) {
    render_pass.set_pipeline(&ctx.pipelines.scene);
    for drawn in lits {
        render_pass.set_vertex_buffer(1, drawn.instance.slice(..));
        render_pass.draw_model(
            drawn.model,
            &ctx.camera.bind_group,
            &ctx.light.bind_group,
        );
    }

    render_pass.set_pipeline(&ctx.pipelines.skybox);
    for drawn in skies {
        render_pass.set_vertex_buffer(1, drawn.instance.slice(..));
        render_pass.draw_sky(drawn.model, &ctx.camera.bind_group);
    }
}
