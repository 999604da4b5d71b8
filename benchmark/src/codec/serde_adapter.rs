// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Generic adapter for any serde data format.

use std::borrow::Cow;
use std::marker::PhantomData;

use codecbench_core::{BenchError, BenchResult, Payload};

use super::formats::WireFormat;
use super::registry::TypeRegistry;
use super::wire::{Envelope, OwnedBody, TypeTag, WireBody, MAX_INLINE_DEPTH};
use super::{AdapterOptions, Capabilities, CodecAdapter};

/// Initial buffer capacity; grows once during warm-up and is then reused.
const INITIAL_BUFFER_CAPACITY: usize = 64;

/// Adapter wrapping one [`WireFormat`].
#[derive(Debug)]
pub struct SerdeAdapter<F> {
    options: AdapterOptions,
    registry: TypeRegistry,
    buffer: Vec<u8>,
    prepared: bool,
    _format: PhantomData<F>,
}

impl<F: WireFormat> SerdeAdapter<F> {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            options,
            registry: TypeRegistry::new(),
            buffer: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            prepared: false,
            _format: PhantomData,
        }
    }

    /// Registration is active only if both the format and the options allow it.
    fn registers_types(&self) -> bool {
        F::TYPE_REGISTRATION && self.options.register_types
    }

    fn configuration_error(&self, reason: impl Into<String>) -> BenchError {
        BenchError::Configuration {
            codec: F::NAME.to_string(),
            reason: reason.into(),
        }
    }

    /// Without reference tracking graphs are nested inline, which needs an
    /// acyclic chain of bounded depth.
    fn check_inline(&self, payload: &Payload) -> BenchResult<()> {
        let Payload::Graph(graph) = payload else {
            return Ok(());
        };
        if graph.is_self_referential() {
            return Err(self.configuration_error(
                "reference tracking is disabled, so a self-referential payload cannot be written",
            ));
        }
        let depth = graph.reachable_len();
        if depth > MAX_INLINE_DEPTH {
            return Err(self.configuration_error(format!(
                "reference tracking is disabled and the graph nests {depth} nodes deep \
                 (inline limit is {MAX_INLINE_DEPTH})"
            )));
        }
        Ok(())
    }

    /// Header for `payload`: its registered id, or its name.
    fn type_tag<'p>(&self, payload: &'p Payload) -> BenchResult<TypeTag<'p>> {
        if !self.registers_types() {
            return Ok(TypeTag::Name(Cow::Borrowed(payload.type_name())));
        }
        self.registry
            .id_of(payload.type_name())
            .map(TypeTag::Id)
            .ok_or_else(|| {
                self.configuration_error(format!(
                    "type {} was not registered during setup",
                    payload.type_name()
                ))
            })
    }
}

impl<F: WireFormat> CodecAdapter for SerdeAdapter<F> {
    fn name(&self) -> &str {
        F::NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            self_reference: self.options.ref_tracking,
            type_registration: self.registers_types(),
            buffer_reuse: F::BUFFER_REUSE,
            decode: true,
        }
    }

    fn prepare(&mut self, payload: &Payload) -> BenchResult<()> {
        if !self.options.ref_tracking {
            self.check_inline(payload)?;
        }

        if self.registers_types() {
            let id = self.registry.register(payload.type_name());
            tracing::debug!(
                codec = F::NAME,
                type_name = payload.type_name(),
                type_id = id,
                "Registered payload type"
            );
        }

        self.buffer.clear();
        self.prepared = true;
        Ok(())
    }

    fn encode(&mut self, payload: &Payload) -> BenchResult<usize> {
        if !self.prepared {
            return Err(self.configuration_error("encode called before prepare"));
        }

        let envelope = Envelope {
            type_tag: self.type_tag(payload)?,
            body: WireBody::new(payload, self.options.ref_tracking),
        };
        F::write(&mut self.buffer, &envelope).map_err(|message| BenchError::Encode {
            codec: F::NAME.to_string(),
            message,
        })?;
        Ok(self.buffer.len())
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn artifact(&self) -> &[u8] {
        &self.buffer
    }

    fn decode(&self, artifact: &[u8]) -> BenchResult<Payload> {
        let decode_error = |message: String| BenchError::Decode {
            codec: F::NAME.to_string(),
            message,
        };

        let envelope: Envelope<'static, OwnedBody> = F::read(artifact).map_err(decode_error)?;
        let payload = envelope.body.into_payload();

        let declared = match &envelope.type_tag {
            TypeTag::Id(id) => self
                .registry
                .name_of(*id)
                .ok_or_else(|| decode_error(format!("unregistered type id {id}")))?,
            TypeTag::Name(name) => name.as_ref(),
        };
        if declared != payload.type_name() {
            return Err(decode_error(format!(
                "header declares {declared} but body holds {}",
                payload.type_name()
            )));
        }

        Ok(payload)
    }
}
