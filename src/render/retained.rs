use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{ScatterError, ScatterResult};
use crate::render::{
    Attr, AttrList, AttrValue, ElementId, ElementKind, PointerEventKind, SceneBatch,
    SceneCommand, StyleTag, Surface,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct AttrTrack {
    attr: Attr,
    from: AttrValue,
    to: AttrValue,
}

/// Attributes animated together by one `Transition` command.
#[derive(Debug, Clone, PartialEq)]
struct ActiveTransition {
    tracks: SmallVec<[AttrTrack; 2]>,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl ActiveTransition {
    fn target(&self, attr: Attr) -> Option<AttrValue> {
        self.tracks
            .iter()
            .find(|track| track.attr == attr)
            .map(|track| track.to)
    }

    /// Stops animating every attribute listed in `attrs`.
    fn release(&mut self, attrs: &AttrList) {
        self.tracks
            .retain(|track| !attrs.iter().any(|(attr, _)| *attr == track.attr));
    }
}

/// One node of the retained element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attrs: IndexMap<Attr, AttrValue>,
    text: Option<String>,
    tags: IndexSet<StyleTag>,
    listeners: IndexSet<PointerEventKind>,
    transitions: Vec<ActiveTransition>,
    remove_on_end: bool,
}

impl SceneElement {
    fn new(kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attrs: IndexMap::new(),
            text: None,
            tags: IndexSet::new(),
            listeners: IndexSet::new(),
            transitions: Vec::new(),
            remove_on_end: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Currently displayed value, mid-transition values included.
    #[must_use]
    pub fn attr(&self, attr: Attr) -> Option<AttrValue> {
        self.attrs.get(&attr).copied()
    }

    #[must_use]
    pub fn number(&self, attr: Attr) -> Option<f64> {
        self.attr(attr).and_then(AttrValue::as_number)
    }

    /// Value the element settles on once its running transitions end.
    #[must_use]
    pub fn target_attr(&self, attr: Attr) -> Option<AttrValue> {
        self.transitions
            .iter()
            .find_map(|transition| transition.target(attr))
            .or_else(|| self.attr(attr))
    }

    #[must_use]
    pub fn target_number(&self, attr: Attr) -> Option<f64> {
        self.target_attr(attr).and_then(AttrValue::as_number)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn has_tag(&self, tag: StyleTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = StyleTag> + '_ {
        self.tags.iter().copied()
    }

    #[must_use]
    pub fn listens(&self, event: PointerEventKind) -> bool {
        self.listeners.contains(&event)
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// In-memory element tree built by replaying scene commands.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedScene {
    elements: IndexMap<ElementId, SceneElement>,
}

impl Default for RetainedScene {
    fn default() -> Self {
        let mut elements = IndexMap::new();
        elements.insert(ElementId::ROOT, SceneElement::new(ElementKind::Group, None));
        Self { elements }
    }
}

impl RetainedScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Number of elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map_or(&[], |element| element.children.as_slice())
    }

    #[must_use]
    pub fn ids_with_tag(&self, tag: StyleTag) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, element)| element.has_tag(tag))
            .map(|(id, _)| *id)
            .collect()
    }

    #[must_use]
    pub fn in_flight_transitions(&self) -> usize {
        self.elements
            .values()
            .filter(|element| element.is_transitioning())
            .count()
    }

    /// Applies every command of `batch`, or none of them when one fails.
    pub fn apply(&mut self, batch: &SceneBatch) -> ScatterResult<()> {
        let mut staged = self.clone();
        batch
            .commands()
            .iter()
            .try_for_each(|command| staged.apply_command(command))?;
        *self = staged;
        Ok(())
    }

    pub fn apply_command(&mut self, command: &SceneCommand) -> ScatterResult<()> {
        match command {
            SceneCommand::Append { id, parent, kind } => {
                if self.elements.contains_key(id) {
                    return Err(ScatterError::InvalidData(format!(
                        "element {id} already exists"
                    )));
                }
                self.element_mut(*parent)?.children.push(*id);
                self.elements
                    .insert(*id, SceneElement::new(*kind, Some(*parent)));
            }
            SceneCommand::SetAttr { id, attr, value } => {
                self.element_mut(*id)?.attrs.insert(*attr, *value);
            }
            SceneCommand::SetText { id, text } => {
                self.element_mut(*id)?.text = Some(text.clone());
            }
            SceneCommand::Transition {
                id,
                duration_ms,
                attrs,
            } => {
                let element = self.element_mut(*id)?;
                for running in &mut element.transitions {
                    running.release(attrs);
                }
                element
                    .transitions
                    .retain(|running| !running.tracks.is_empty());
                let tracks = attrs
                    .iter()
                    .map(|(attr, to)| AttrTrack {
                        attr: *attr,
                        from: element.attr(*attr).unwrap_or(*to),
                        to: *to,
                    })
                    .collect();
                element.transitions.push(ActiveTransition {
                    tracks,
                    duration_ms: f64::from(*duration_ms),
                    elapsed_ms: 0.0,
                });
            }
            SceneCommand::SetClass { id, tag, enabled } => {
                let element = self.element_mut(*id)?;
                if *enabled {
                    element.tags.insert(*tag);
                } else {
                    element.tags.shift_remove(tag);
                }
            }
            SceneCommand::Listen { id, event } => {
                self.element_mut(*id)?.listeners.insert(*event);
            }
            SceneCommand::Unlisten { id, event } => {
                self.element_mut(*id)?.listeners.shift_remove(event);
            }
            SceneCommand::Remove {
                id,
                after_transition,
            } => {
                let element = self.element_mut(*id)?;
                if *after_transition && element.is_transitioning() {
                    element.remove_on_end = true;
                } else {
                    self.remove_subtree(*id);
                }
            }
        }
        Ok(())
    }

    /// Moves every running transition forward by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let mut finished_removals = Vec::new();
        for (id, element) in &mut self.elements {
            if element.transitions.is_empty() {
                continue;
            }
            for transition in &mut element.transitions {
                transition.elapsed_ms += elapsed_ms.max(0.0);
                let progress = (transition.elapsed_ms / transition.duration_ms).min(1.0);
                let eased = ease_cubic_in_out(progress);
                for track in &transition.tracks {
                    element
                        .attrs
                        .insert(track.attr, track.from.interpolate(track.to, eased));
                }
            }
            element
                .transitions
                .retain(|transition| transition.elapsed_ms < transition.duration_ms);

            if element.transitions.is_empty() && element.remove_on_end {
                finished_removals.push(*id);
            }
        }

        for id in finished_removals {
            if self.elements.contains_key(&id) {
                self.remove_subtree(id);
            }
        }
    }

    /// Completes all running transitions.
    pub fn settle(&mut self) {
        self.advance(f64::INFINITY);
    }

    fn element_mut(&mut self, id: ElementId) -> ScatterResult<&mut SceneElement> {
        self.elements
            .get_mut(&id)
            .ok_or(ScatterError::UnknownElement(id))
    }

    fn remove_subtree(&mut self, id: ElementId) {
        if let Some(parent) = self.elements.get(&id).and_then(SceneElement::parent) {
            if let Some(parent) = self.elements.get_mut(&parent) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(element) = self.elements.shift_remove(&next) {
                pending.extend(element.children);
            }
        }
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Headless surface used by tests and non-interactive hosts.
///
/// It validates every batch and replays it into a [`RetainedScene`] so the
/// resulting tree can be inspected.
#[derive(Debug, Default)]
pub struct RetainedSurface {
    scene: RetainedScene,
    pub batches_applied: usize,
    pub commands_applied: usize,
    pub transitions_started: usize,
}

impl RetainedSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scene(&self) -> &RetainedScene {
        &self.scene
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        self.scene.advance(elapsed_ms);
    }

    pub fn settle(&mut self) {
        self.scene.settle();
    }
}

impl Surface for RetainedSurface {
    fn apply(&mut self, batch: &SceneBatch) -> ScatterResult<()> {
        batch.validate()?;
        self.scene.apply(batch)?;
        self.batches_applied += 1;
        self.commands_applied += batch.len();
        self.transitions_started += batch.transition_count();
        trace!(
            commands = batch.len(),
            transitions = batch.transition_count(),
            "applied scene batch"
        );
        Ok(())
    }
}
