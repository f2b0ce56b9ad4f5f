// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// In-memory protocol format used by the integration suites: the encoder
// records every protocol operation as an event, and the decoder replays an
// event stream back through the reader contract. Element events replay as
// index tokens; a stream built without them drives the all-at-once path.

use elser::{
    Decoder, ElementDescriptor, ElementToken, Encoder, EnumType, Primitive, PrimitiveTag, Result,
    StreamError,
};
use std::collections::VecDeque;

/// One recorded protocol operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin,
    End,
    Element(usize),
    Prim(Primitive),
    Unit,
    Enum(u32),
    NotNull,
    Null,
}

/// Encoder recording operations in invocation order.
#[derive(Debug, Default)]
pub struct EventEncoder {
    pub events: Vec<Event>,
}

impl Encoder for EventEncoder {
    fn write_begin(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        self.events.push(Event::Begin);
        Ok(())
    }

    fn write_end(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        self.events.push(Event::End);
        Ok(())
    }

    fn write_element(&mut self, _desc: &dyn ElementDescriptor, index: usize) -> Result<()> {
        self.events.push(Event::Element(index));
        Ok(())
    }

    fn write_primitive_value(&mut self, value: &Primitive) -> Result<()> {
        self.events.push(Event::Prim(value.clone()));
        Ok(())
    }

    fn write_unit_value(&mut self) -> Result<()> {
        self.events.push(Event::Unit);
        Ok(())
    }

    fn write_enum_value(&mut self, _ty: &EnumType, ordinal: u32) -> Result<()> {
        self.events.push(Event::Enum(ordinal));
        Ok(())
    }

    fn write_not_null_mark(&mut self) -> Result<()> {
        self.events.push(Event::NotNull);
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        self.events.push(Event::Null);
        Ok(())
    }
}

/// Negotiation style the replaying decoder answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Negotiation {
    /// Element events replay as index tokens; anything else ends the structure.
    Replay,
    /// Every negotiation answers "all remaining elements in order".
    AllUpFront,
}

/// Decoder replaying a recorded event stream.
#[derive(Debug)]
pub struct EventDecoder {
    events: VecDeque<Event>,
    negotiation: Negotiation,
}

impl EventDecoder {
    /// Replay a stream produced by [`EventEncoder`], element by element.
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
            negotiation: Negotiation::Replay,
        }
    }

    /// Replay a stream with no element events, announcing the all-in-order
    /// fast path at every negotiation.
    pub fn all_up_front(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
            negotiation: Negotiation::AllUpFront,
        }
    }

    fn next(&mut self, expected: &str) -> Result<Event> {
        self.events.pop_front().ok_or_else(|| {
            StreamError::Malformed {
                reason: format!("stream ended while expecting {expected}"),
            }
            .into()
        })
    }

    fn unexpected(expected: &str, found: &Event) -> elser::Error {
        StreamError::Malformed {
            reason: format!("expected {expected}, found {found:?}"),
        }
        .into()
    }
}

impl Decoder for EventDecoder {
    fn read_begin(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        match self.next("begin")? {
            Event::Begin => Ok(()),
            other => Err(Self::unexpected("begin", &other)),
        }
    }

    fn read_end(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        match self.next("end")? {
            Event::End => Ok(()),
            other => Err(Self::unexpected("end", &other)),
        }
    }

    fn read_element(&mut self, _desc: &dyn ElementDescriptor) -> Result<ElementToken> {
        if self.negotiation == Negotiation::AllUpFront {
            return Ok(ElementToken::All);
        }
        match self.events.front() {
            Some(Event::Element(_)) => match self.next("element")? {
                Event::Element(index) => Ok(ElementToken::Index(index)),
                _ => unreachable!(),
            },
            _ => Ok(ElementToken::Done),
        }
    }

    fn read_primitive_value(&mut self, tag: PrimitiveTag) -> Result<Primitive> {
        match self.next("primitive")? {
            Event::Prim(p) if p.tag() == tag => Ok(p),
            other => Err(Self::unexpected("primitive", &other)),
        }
    }

    fn read_unit_value(&mut self) -> Result<()> {
        match self.next("unit")? {
            Event::Unit => Ok(()),
            other => Err(Self::unexpected("unit", &other)),
        }
    }

    fn read_enum_value(&mut self, _ty: &EnumType) -> Result<u32> {
        match self.next("enum")? {
            Event::Enum(ordinal) => Ok(ordinal),
            other => Err(Self::unexpected("enum", &other)),
        }
    }

    fn read_not_null_mark(&mut self) -> Result<bool> {
        match self.next("null mark")? {
            Event::NotNull => Ok(true),
            Event::Null => {
                // Put the null back; read_null_value consumes it.
                self.events.push_front(Event::Null);
                Ok(false)
            }
            other => Err(Self::unexpected("null mark", &other)),
        }
    }

    fn read_null_value(&mut self) -> Result<()> {
        match self.next("null")? {
            Event::Null => Ok(()),
            other => Err(Self::unexpected("null", &other)),
        }
    }
}
