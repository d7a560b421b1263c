// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link events and their effect on the block graph.
//!
//! A link moves `Unbound -> SourceSet -> FullyBound` as its endpoints are
//! bound, and ends `Removed`. Completing a link either connects two points
//! or, when the output belongs to a literal node, injects the literal into
//! the input point. Removing or rebinding a link undoes that first.

use crate::editor::{EditorError, GraphEditor};
use crate::link::{Link, LinkEvent, LinkId, LinkState};
use crate::orientation::{self, Orientation};
use crate::port::{PortBinding, PortRef};
use crate::semantic::SemanticGraph;
use crate::signal::EditorSignal;
use ordoplay_material_graph::PointId;

#[derive(Clone, Copy)]
enum Endpoint {
    Source,
    Target,
}

impl<G: SemanticGraph> GraphEditor<G> {
    /// Apply a link event and return the link's resulting state.
    ///
    /// Endpoints that do not form an input/output pair leave the link in
    /// `SourceSet` with no effect on the graph. So does a connection the
    /// graph refuses, which is logged as an error.
    pub fn dispatch(&mut self, event: LinkEvent) -> Result<LinkState, EditorError> {
        match event {
            LinkEvent::Created(id) => {
                if self.model.link(id).is_some() {
                    return Err(EditorError::DuplicateLink(id));
                }
                self.model.add_link(Link::new(id));
                Ok(LinkState::Unbound)
            }
            LinkEvent::SourceBound(id, port) => self.bind(id, port, Endpoint::Source),
            LinkEvent::TargetBound(id, port) => self.bind(id, port, Endpoint::Target),
            LinkEvent::Removed(id) => Ok(self.remove_link(id)?.state),
        }
    }

    /// Create a link between two ports given in either order
    pub fn link_ports(&mut self, a: PortRef, b: PortRef) -> Result<LinkId, EditorError> {
        let id = LinkId::new();
        self.dispatch(LinkEvent::Created(id))?;
        self.dispatch(LinkEvent::SourceBound(id, a))?;
        self.dispatch(LinkEvent::TargetBound(id, b))?;
        Ok(id)
    }

    /// Undo a link's effect and drop it from the model
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, EditorError> {
        if self.model.link(id).is_none() {
            return Err(EditorError::LinkNotFound(id));
        }

        self.selection.clear();
        self.signals.emit(EditorSignal::SelectionCleared);

        self.teardown(id)?;
        let mut link = self
            .model
            .remove_link(id)
            .ok_or(EditorError::LinkNotFound(id))?;
        link.state = LinkState::Removed;

        self.signals.emit(EditorSignal::LinkRemoved(id));
        tracing::debug!("Removed link {:?}", id);
        Ok(link)
    }

    fn bind(&mut self, id: LinkId, port: PortRef, endpoint: Endpoint) -> Result<LinkState, EditorError> {
        if self.model.port(port).is_none() {
            return Err(EditorError::PortNotFound(port));
        }
        let state = self
            .model
            .link(id)
            .ok_or(EditorError::LinkNotFound(id))?
            .state;
        if state == LinkState::FullyBound {
            self.teardown(id)?;
        }

        let link = self
            .model
            .link_mut(id)
            .ok_or(EditorError::LinkNotFound(id))?;
        match endpoint {
            Endpoint::Source => link.source = Some(port),
            Endpoint::Target => {
                if link.source.is_none() {
                    return Err(EditorError::EndpointOrder(id));
                }
                link.target = Some(port);
            }
        }
        link.state = LinkState::SourceSet;

        if link.target.is_some() {
            self.complete(id)
        } else {
            Ok(LinkState::SourceSet)
        }
    }

    fn complete(&mut self, id: LinkId) -> Result<LinkState, EditorError> {
        let Some((input, output)) = self.orient(id)? else {
            tracing::trace!("Link {:?} does not join an input and an output", id);
            return Ok(LinkState::SourceSet);
        };

        let input_point = self.model.port(input).and_then(|p| p.point());
        let output_point = self.model.port(output).and_then(|p| p.point());
        let Some(input_point) = input_point else {
            return Ok(LinkState::SourceSet);
        };

        // An input takes one link; others go only once this one is accepted
        match output_point {
            Some(output_point) => {
                if let Err(err) = self.graph.connect_to(output_point, input_point) {
                    self.log.error(format!("Cannot link ports: {err}"));
                    return Ok(LinkState::SourceSet);
                }
                self.displace_links_into(id, input, true)?;
            }
            None => {
                let fed = self.model.port(output).and_then(|p| match p.binding {
                    PortBinding::Adopted(point) => Some(point),
                    _ => None,
                });
                if fed.is_some_and(|point| point != input_point) {
                    self.log
                        .error("Cannot link ports: literal already feeds another input");
                    return Ok(LinkState::SourceSet);
                }
                self.displace_links_into(id, input, false)?;
                self.adopt(output, input_point)?;
            }
        }

        if let Some(link) = self.model.link_mut(id) {
            link.state = LinkState::FullyBound;
        }
        self.rebuild();
        Ok(LinkState::FullyBound)
    }

    /// Inject a literal node's value into another block's input
    fn adopt(&mut self, output: PortRef, point: PointId) -> Result<(), EditorError> {
        let view = self
            .graph
            .point_view(point)
            .ok_or(EditorError::PointNotFound(point))?;
        let port = self
            .model
            .port_mut(output)
            .ok_or(EditorError::PortNotFound(output))?;

        let value = port
            .literal
            .clone()
            .filter(|literal| literal.value_type() == view.value_type)
            .or_else(|| view.default_value.clone())
            .or_else(|| view.value_type.default_value());
        port.adopt(&view);
        port.literal = value.clone();

        if let Some(node) = self.model.node_mut(output.node) {
            node.connection = Some(point);
        }
        self.graph.set_value(point, value)?;
        tracing::debug!("Literal now feeds {}", view.name);
        Ok(())
    }

    /// Undo the graph effect of a fully bound link
    fn teardown(&mut self, id: LinkId) -> Result<(), EditorError> {
        let state = self
            .model
            .link(id)
            .ok_or(EditorError::LinkNotFound(id))?
            .state;
        if state != LinkState::FullyBound {
            return Ok(());
        }
        if let Some(link) = self.model.link_mut(id) {
            link.state = LinkState::SourceSet;
        }
        let Some((input, output)) = self.orient(id)? else {
            return Ok(());
        };

        let input_point = self.model.port(input).and_then(|p| p.point());
        let output_point = self.model.port(output).and_then(|p| p.point());

        match (output_point, input_point) {
            (Some(output_point), Some(input_point)) => {
                if let Err(err) = self.graph.disconnect_from(output_point, input_point) {
                    tracing::warn!("Disconnect of link {:?} failed: {}", id, err);
                }
                for (port, point) in [(output, output_point), (input, input_point)] {
                    let Some(view) = self.graph.point_view(point) else {
                        continue;
                    };
                    if let Some(port) = self.model.port_mut(port) {
                        port.sync_with_point(&view);
                    }
                }
            }
            (None, Some(input_point)) => {
                let holds_value = self
                    .graph
                    .point_view(input_point)
                    .is_some_and(|view| view.value.is_some());
                if holds_value {
                    self.graph.set_value(input_point, None)?;
                }
                if let Some(port) = self.model.port_mut(output) {
                    if port.binding == PortBinding::Adopted(input_point) {
                        port.release();
                    }
                }
                if let Some(node) = self.model.node_mut(output.node) {
                    if node.connection == Some(input_point) {
                        node.connection = None;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Remove other fully bound links into `input`.
    ///
    /// With `source_replaced` the graph has already swapped the input's
    /// source, so edges between two points are dropped without a disconnect.
    fn displace_links_into(
        &mut self,
        keep: LinkId,
        input: PortRef,
        source_replaced: bool,
    ) -> Result<(), EditorError> {
        let displaced: Vec<(LinkId, Option<PortRef>)> = self
            .model
            .links()
            .filter(|l| l.id != keep && l.state == LinkState::FullyBound)
            .filter(|l| l.source == Some(input) || l.target == Some(input))
            .map(|l| {
                let other = if l.source == Some(input) { l.target } else { l.source };
                (l.id, other)
            })
            .collect();
        for (link, other) in displaced {
            let edge = other
                .and_then(|port| self.model.port(port))
                .is_some_and(|port| port.is_bound());
            if source_replaced && edge {
                if let Some(link) = self.model.link_mut(link) {
                    link.state = LinkState::SourceSet;
                }
            }
            tracing::debug!("Link {:?} replaced", link);
            self.remove_link(link)?;
        }
        Ok(())
    }

    /// Input and output ends of a link, if it has a valid pair
    fn orient(&self, id: LinkId) -> Result<Option<(PortRef, PortRef)>, EditorError> {
        let link = self.model.link(id).ok_or(EditorError::LinkNotFound(id))?;
        let (Some(a), Some(b)) = (link.source, link.target) else {
            return Ok(None);
        };
        let a = self.model.port(a).ok_or(EditorError::PortNotFound(a))?;
        let b = self.model.port(b).ok_or(EditorError::PortNotFound(b))?;
        Ok(match orientation::resolve(a, b) {
            Orientation::Resolved { input, output } => Some((input, output)),
            Orientation::Invalid => None,
        })
    }
}
