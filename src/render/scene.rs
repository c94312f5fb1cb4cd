use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ScatterError, ScatterResult};

/// Stable identifier of one retained scene element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    /// The canvas itself. Always present; every other element descends from it.
    pub const ROOT: ElementId = ElementId(0);

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out element ids in creation order.
#[derive(Debug, Clone)]
pub struct ElementIdAllocator {
    next: u32,
}

impl Default for ElementIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ElementIdAllocator {
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Group,
    Circle,
    Text,
    Line,
    /// Floating multi-line panel positioned in canvas coordinates.
    Tooltip,
}

/// Attribute keys understood by surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attr {
    X,
    Y,
    Dy,
    Cx,
    Cy,
    R,
    X1,
    Y1,
    X2,
    Y2,
    Opacity,
    FontSize,
    TextAnchor,
    Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Number(f64),
    Translate { x: f64, y: f64 },
    /// Rotation in degrees.
    Rotate(f64),
    Anchor(TextAnchor),
}

impl AttrValue {
    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            AttrValue::Number(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            AttrValue::Number(value) | AttrValue::Rotate(value) => value.is_finite(),
            AttrValue::Translate { x, y } => x.is_finite() && y.is_finite(),
            AttrValue::Anchor(_) => true,
        }
    }

    /// Value at progress `t` (already eased) between `self` and `to`.
    ///
    /// Values of different shapes cannot be blended and snap to `to`.
    #[must_use]
    pub fn interpolate(self, to: AttrValue, t: f64) -> AttrValue {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        match (self, to) {
            (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(lerp(a, b)),
            (AttrValue::Rotate(a), AttrValue::Rotate(b)) => AttrValue::Rotate(lerp(a, b)),
            (AttrValue::Translate { x: ax, y: ay }, AttrValue::Translate { x: bx, y: by }) => {
                AttrValue::Translate {
                    x: lerp(ax, bx),
                    y: lerp(ay, by),
                }
            }
            _ if t >= 1.0 => to,
            _ => self,
        }
    }
}

/// Named style tags, the equivalent of CSS classes on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTag {
    Active,
    Inactive,
    StateCircle,
    StateText,
    XAxis,
    YAxis,
    Tick,
    Domain,
    AxisCaption,
    Tooltip,
}

impl StyleTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StyleTag::Active => "active",
            StyleTag::Inactive => "inactive",
            StyleTag::StateCircle => "stateCircle",
            StyleTag::StateText => "stateText",
            StyleTag::XAxis => "x-axis",
            StyleTag::YAxis => "y-axis",
            StyleTag::Tick => "tick",
            StyleTag::Domain => "domain",
            StyleTag::AxisCaption => "aText",
            StyleTag::Tooltip => "d3-tip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEventKind {
    Click,
    PointerEnter,
    PointerLeave,
}

pub type AttrList = SmallVec<[(Attr, AttrValue); 2]>;

/// One retained-mode instruction for a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Append {
        id: ElementId,
        parent: ElementId,
        kind: ElementKind,
    },
    SetAttr {
        id: ElementId,
        attr: Attr,
        value: AttrValue,
    },
    SetText {
        id: ElementId,
        text: String,
    },
    /// Animates attributes from their current values. Replaces any transition
    /// already running on the element.
    Transition {
        id: ElementId,
        duration_ms: u32,
        attrs: AttrList,
    },
    SetClass {
        id: ElementId,
        tag: StyleTag,
        enabled: bool,
    },
    Listen {
        id: ElementId,
        event: PointerEventKind,
    },
    Unlisten {
        id: ElementId,
        event: PointerEventKind,
    },
    /// Detaches the element and its descendants, immediately or once its
    /// running transition ends.
    Remove {
        id: ElementId,
        after_transition: bool,
    },
}

impl SceneCommand {
    #[must_use]
    pub fn target(&self) -> ElementId {
        match self {
            SceneCommand::Append { id, .. }
            | SceneCommand::SetAttr { id, .. }
            | SceneCommand::SetText { id, .. }
            | SceneCommand::Transition { id, .. }
            | SceneCommand::SetClass { id, .. }
            | SceneCommand::Listen { id, .. }
            | SceneCommand::Unlisten { id, .. }
            | SceneCommand::Remove { id, .. } => *id,
        }
    }

    pub fn validate(&self) -> ScatterResult<()> {
        match self {
            SceneCommand::Append { id, .. } if *id == ElementId::ROOT => Err(
                ScatterError::InvalidData("root element cannot be appended".to_owned()),
            ),
            SceneCommand::SetAttr { attr, value, .. } => validate_attr(*attr, *value),
            SceneCommand::Transition {
                duration_ms, attrs, ..
            } => {
                if *duration_ms == 0 {
                    return Err(ScatterError::InvalidData(
                        "transition duration must be > 0".to_owned(),
                    ));
                }
                attrs
                    .iter()
                    .try_for_each(|(attr, value)| validate_attr(*attr, *value))
            }
            SceneCommand::Remove { id, .. } if *id == ElementId::ROOT => Err(
                ScatterError::InvalidData("root element cannot be removed".to_owned()),
            ),
            _ => Ok(()),
        }
    }
}

fn validate_attr(attr: Attr, value: AttrValue) -> ScatterResult<()> {
    if !value.is_finite() {
        return Err(ScatterError::InvalidData(format!(
            "attribute {attr:?} must be finite"
        )));
    }
    Ok(())
}

/// Ordered commands applied to a surface as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneBatch {
    commands: Vec<SceneCommand>,
}

impl SceneBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: SceneCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn append(&mut self, id: ElementId, parent: ElementId, kind: ElementKind) -> &mut Self {
        self.push(SceneCommand::Append { id, parent, kind })
    }

    pub fn set_attr(&mut self, id: ElementId, attr: Attr, value: AttrValue) -> &mut Self {
        self.push(SceneCommand::SetAttr { id, attr, value })
    }

    pub fn set_number(&mut self, id: ElementId, attr: Attr, value: f64) -> &mut Self {
        self.set_attr(id, attr, AttrValue::Number(value))
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> &mut Self {
        self.push(SceneCommand::SetText {
            id,
            text: text.into(),
        })
    }

    pub fn transition(
        &mut self,
        id: ElementId,
        duration_ms: u32,
        attrs: impl IntoIterator<Item = (Attr, AttrValue)>,
    ) -> &mut Self {
        self.push(SceneCommand::Transition {
            id,
            duration_ms,
            attrs: attrs.into_iter().collect(),
        })
    }

    /// Sets or clears a style tag.
    pub fn classed(&mut self, id: ElementId, tag: StyleTag, enabled: bool) -> &mut Self {
        self.push(SceneCommand::SetClass { id, tag, enabled })
    }

    pub fn listen(&mut self, id: ElementId, event: PointerEventKind) -> &mut Self {
        self.push(SceneCommand::Listen { id, event })
    }

    pub fn unlisten(&mut self, id: ElementId, event: PointerEventKind) -> &mut Self {
        self.push(SceneCommand::Unlisten { id, event })
    }

    pub fn remove(&mut self, id: ElementId, after_transition: bool) -> &mut Self {
        self.push(SceneCommand::Remove {
            id,
            after_transition,
        })
    }

    #[must_use]
    pub fn commands(&self) -> &[SceneCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, SceneCommand::Transition { .. }))
            .count()
    }

    pub fn validate(&self) -> ScatterResult<()> {
        self.commands.iter().try_for_each(SceneCommand::validate)
    }
}
