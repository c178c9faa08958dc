use std::collections::HashMap;

use crate::error::ParseError;
use crate::parsing::events::{EventKind, StructuralEvent, UnknownEventKind};
use crate::parsing::parser::MdParser;

type Handler<'a> = Box<dyn FnMut(&StructuralEvent) + 'a>;

/// Subscribe-by-name front end for [`MdParser`].
///
/// Handlers run in registration order for each event of their kind. Nothing
/// is read until [`pump`](Self::pump) or [`resume`](Self::resume) is called,
/// and each `pump` reads at most one line, which lets a consumer pace the
/// underlying source.
pub struct EventDispatcher<'a> {
    parser: MdParser,
    handlers: HashMap<EventKind, Vec<Handler<'a>>>,
    done: bool,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(parser: MdParser) -> Self {
        Self {
            parser,
            handlers: HashMap::new(),
            done: false,
        }
    }

    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&StructuralEvent) + 'a) -> &mut Self {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
        self
    }

    /// Like [`on`](Self::on), addressed by kebab-case name such as
    /// `"internal-link"` or `"end"`.
    pub fn on_name(
        &mut self,
        name: &str,
        handler: impl FnMut(&StructuralEvent) + 'a,
    ) -> Result<&mut Self, UnknownEventKind> {
        let kind = name.parse()?;
        Ok(self.on(kind, handler))
    }

    /// Processes one line and dispatches its events. Returns `Ok(false)` once
    /// `End` has been delivered.
    pub fn pump(&mut self) -> Result<bool, ParseError> {
        if self.done {
            return Ok(false);
        }
        let Some(chunk) = self.parser.next_chunk() else {
            self.done = true;
            return Ok(false);
        };
        let chunk = chunk.inspect_err(|_| self.done = true)?;
        for event in &chunk {
            if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
                for handler in handlers.iter_mut() {
                    handler(event);
                }
            }
            if *event == StructuralEvent::End {
                self.done = true;
            }
        }
        Ok(!self.done)
    }

    /// Drains the source, dispatching everything through `End`.
    pub fn resume(&mut self) -> Result<(), ParseError> {
        while self.pump()? {}
        Ok(())
    }
}
