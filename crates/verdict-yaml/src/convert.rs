use indexmap::IndexMap;
use tracing::debug;
use verdict_tree::TreeValue;
use yaml_rust2::parser::{Event, EventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;

use crate::error::{YamlError, YamlResult};
use crate::scalar::resolve_scalar;

/// Callback invoked when a mapping key repeats an earlier key.
pub type DuplicateKeyFn<'a> = dyn FnMut(&str) + 'a;

/// Hook invoked for every completed node; may substitute a replacement.
///
/// For scalars the hook sees the scalar event, for sequences and mappings
/// the start event of the container. Conversion itself never depends on the
/// hook; it exists for callers that attach source positions or annotations.
pub type NodeHookFn<'a> = dyn FnMut(TreeValue, &Event) -> TreeValue + 'a;

/// Converts a YAML document into a tree.
///
/// Only the first document of a stream is converted. Anchors, aliases,
/// merge keys, and non-scalar mapping keys are rejected with
/// [`YamlError::UnsupportedConstruct`]. Duplicate mapping keys keep the first
/// occurrence's position and the last occurrence's value.
#[derive(Default)]
pub struct Converter<'a> {
    on_duplicate_key: Option<Box<DuplicateKeyFn<'a>>>,
    on_node_built: Option<Box<NodeHookFn<'a>>>,
}

impl<'a> Converter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report each repeated mapping key to `callback`, once per repetition.
    pub fn on_duplicate_key(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.on_duplicate_key = Some(Box::new(callback));
        self
    }

    /// Run `hook` over every completed node.
    pub fn on_node_built(mut self, hook: impl FnMut(TreeValue, &Event) -> TreeValue + 'a) -> Self {
        self.on_node_built = Some(Box::new(hook));
        self
    }

    /// Convert `input`, returning `None` for an empty stream.
    pub fn convert(self, input: &str) -> YamlResult<Option<TreeValue>> {
        let mut builder = TreeBuilder {
            stack: Vec::new(),
            documents: Vec::new(),
            on_duplicate_key: self.on_duplicate_key,
            on_node_built: self.on_node_built,
            error: None,
        };
        let mut parser = Parser::new(input.chars());
        let loaded = parser.load(&mut builder, false);
        if let Some(error) = builder.error {
            return Err(error);
        }
        loaded?;
        let tree = builder.documents.into_iter().next();
        debug!(present = tree.is_some(), "converted YAML document");
        Ok(tree)
    }
}

/// One-shot conversion with no callbacks attached.
pub fn to_tree(input: &str) -> YamlResult<Option<TreeValue>> {
    Converter::new().convert(input)
}

/// A container being assembled. The start event is kept for the node hook.
enum Frame {
    Sequence {
        items: Vec<TreeValue>,
        start: Event,
    },
    Mapping {
        entries: IndexMap<String, TreeValue>,
        pending_key: Option<String>,
        start: Event,
    },
}

/// Builds a tree from parser events.
struct TreeBuilder<'a> {
    stack: Vec<Frame>,
    documents: Vec<TreeValue>,
    on_duplicate_key: Option<Box<DuplicateKeyFn<'a>>>,
    on_node_built: Option<Box<NodeHookFn<'a>>>,
    error: Option<YamlError>,
}

impl TreeBuilder<'_> {
    /// Record the first failure; later events are ignored.
    fn fail(&mut self, construct: &str) {
        if self.error.is_none() {
            debug!(construct, "rejected YAML construct");
            self.error = Some(YamlError::UnsupportedConstruct {
                construct: construct.to_string(),
            });
        }
    }

    fn apply_hook(&mut self, node: TreeValue, event: &Event) -> TreeValue {
        match self.on_node_built.as_mut() {
            Some(hook) => hook(node, event),
            None => node,
        }
    }

    /// Attach a completed node to the enclosing container, or record it as
    /// the document root.
    fn push_value(&mut self, node: TreeValue) {
        match self.stack.last_mut() {
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => {
                if let Some(key) = pending_key.take() {
                    // IndexMap keeps the first occurrence's position and
                    // overwrites the value.
                    entries.insert(key, node);
                }
            }
            None => self.documents.push(node),
        }
    }

    /// Whether the next node would land in mapping-key position.
    fn awaiting_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame::Mapping {
                pending_key: None,
                ..
            })
        )
    }

    fn on_scalar(&mut self, ev: Event) {
        let Event::Scalar(ref text, style, _, _) = ev else {
            return;
        };
        if self.awaiting_key() {
            if text == "<<" && style == TScalarStyle::Plain {
                self.fail("merge key");
                return;
            }
            if let Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) = self.stack.last_mut()
            {
                if entries.contains_key(text.as_str()) {
                    if let Some(callback) = self.on_duplicate_key.as_mut() {
                        callback(text);
                    }
                }
                *pending_key = Some(text.clone());
            }
            return;
        }
        let node = resolve_scalar(text, style);
        let node = self.apply_hook(node, &ev);
        self.push_value(node);
    }

    fn on_container_start(&mut self, ev: Event) {
        if self.awaiting_key() {
            self.fail("non-scalar mapping key");
            return;
        }
        let frame = match ev {
            Event::SequenceStart(..) => Frame::Sequence {
                items: Vec::new(),
                start: ev,
            },
            Event::MappingStart(..) => Frame::Mapping {
                entries: IndexMap::new(),
                pending_key: None,
                start: ev,
            },
            _ => return,
        };
        self.stack.push(frame);
    }

    fn on_sequence_end(&mut self) {
        if let Some(Frame::Sequence { items, start }) = self.stack.pop() {
            let node = self.apply_hook(TreeValue::Array(items), &start);
            self.push_value(node);
        }
    }

    fn on_mapping_end(&mut self) {
        if let Some(Frame::Mapping { entries, start, .. }) = self.stack.pop() {
            let node = self.apply_hook(TreeValue::Object(entries), &start);
            self.push_value(node);
        }
    }
}

impl EventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}
            Event::Alias(_) => self.fail("alias"),
            Event::Scalar(..) => self.on_scalar(ev),
            Event::SequenceStart(..) | Event::MappingStart(..) => self.on_container_start(ev),
            Event::SequenceEnd => self.on_sequence_end(),
            Event::MappingEnd => self.on_mapping_end(),
        }
    }
}
