// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render driver: transform pass followed by a draw walk.
//!
//! The scene does not know how to paint anything. Leaf drawing is supplied by
//! the visual payload through [`Draw`], against whatever renderer type the
//! embedder uses.

use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::tree::{Scene, TransformStats};
use crate::types::NodeId;

/// What a visual needs to know to draw itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawContext {
    /// The node being drawn.
    pub node: NodeId,
    /// The node's world matrix.
    pub world: Matrix,
    /// Product of the node's alpha and all of its ancestors' alphas.
    pub alpha: f64,
}

/// A visual payload that can paint itself onto a renderer of type `R`.
pub trait Draw<R: ?Sized> {
    /// Paints the visual.
    fn draw(&self, renderer: &mut R, cx: &DrawContext);
}

impl<R: ?Sized> Draw<R> for () {
    fn draw(&self, _renderer: &mut R, _cx: &DrawContext) {}
}

impl<V> Scene<V> {
    /// Updates world transforms, then draws every visible node in tree order.
    ///
    /// Parents are drawn before their children and children back to front.
    /// Invisible nodes hide their whole subtree. Returns the transform pass
    /// counters.
    pub fn render<R: ?Sized>(&mut self, renderer: &mut R) -> TransformStats
    where
        V: Draw<R>,
    {
        let stats = self.update_transforms();
        self.draw(renderer);
        stats
    }

    /// Runs only the draw walk, using the cached world matrices.
    pub fn draw<R: ?Sized>(&self, renderer: &mut R)
    where
        V: Draw<R>,
    {
        let mut stack: Vec<(NodeId, f64)> = Vec::from([(self.root(), 1.0)]);
        while let Some((id, inherited)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if !node.visible() {
                continue;
            }
            let alpha = inherited * node.alpha();
            if let Some(visual) = node.visual() {
                let cx = DrawContext {
                    node: id,
                    world: *node.world_transform(),
                    alpha,
                };
                visual.draw(renderer, &cx);
            }
            stack.extend(node.children().iter().rev().map(|&c| (c, alpha)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Label(&'static str);

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, f64, f64)>,
    }

    impl Draw<Recorder> for Label {
        fn draw(&self, renderer: &mut Recorder, cx: &DrawContext) {
            renderer.calls.push((self.0, cx.world.tx, cx.alpha));
        }
    }

    #[test]
    fn draws_pre_order_with_accumulated_alpha() {
        let mut scene: Scene<Label> = Scene::new();
        let root = scene.root();
        let panel = scene.insert_visual(Label("panel"));
        let back = scene.insert_visual(Label("back"));
        let front = scene.insert_visual(Label("front"));
        let hidden = scene.insert_visual(Label("hidden"));
        scene.add_child(root, panel).unwrap();
        scene.add_child(panel, front).unwrap();
        scene.add_child(panel, back).unwrap();
        scene.add_child(root, hidden).unwrap();
        scene.set_z_index(front, 1);
        scene.node_mut(panel).unwrap().set_alpha(0.5);
        scene.node_mut(back).unwrap().set_alpha(0.5);
        scene.node_mut(hidden).unwrap().set_visible(false);
        scene.transform_mut(panel).unwrap().set_x(10.0);

        let mut rec = Recorder::default();
        let stats = scene.render(&mut rec);
        assert_eq!(stats.visited, 5);
        assert_eq!(
            rec.calls,
            [("panel", 10.0, 0.5), ("back", 10.0, 0.25), ("front", 10.0, 0.5)]
        );
    }

    #[test]
    fn unit_visual_draws_nothing() {
        let mut scene: Scene = Scene::new();
        let n = scene.insert();
        scene.add_child(scene.root(), n).unwrap();
        scene.render(&mut ());
    }
}
