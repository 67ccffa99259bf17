// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory world state and the stub executing a transaction against it.

use std::collections::BTreeMap;

use crate::{ChaincodeEvent, ChaincodeStub, Invocation, StubError};

/// The committed key-value state shared by all transactions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorldState {
    entries: BTreeMap<String, Vec<u8>>,
}

impl WorldState {
    /// Returns the committed value under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies the writes of a transaction.
    pub fn commit(&mut self, writes: BTreeMap<String, Option<Vec<u8>>>) {
        for (key, value) in writes {
            match value {
                Some(value) => self.entries.insert(key, value),
                None => self.entries.remove(&key),
            };
        }
    }
}

/// What a transaction asked the host to do.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TransactionEffects {
    /// Pending writes; `None` deletes the key.
    pub writes: BTreeMap<String, Option<Vec<u8>>>,
    /// The event set by the transaction.
    pub event: Option<ChaincodeEvent>,
}

/// A [`ChaincodeStub`] executing one transaction against a [`WorldState`].
///
/// Reads observe the committed state only; writes are buffered until the host decides
/// whether to commit them.
pub struct TransactionStub<'state> {
    state: &'state WorldState,
    invocation: Invocation,
    tx_id: String,
    channel_id: String,
    effects: TransactionEffects,
}

impl<'state> TransactionStub<'state> {
    /// Creates a stub for the transaction `tx_id` on `channel_id`.
    pub fn new(
        state: &'state WorldState,
        invocation: Invocation,
        tx_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        TransactionStub {
            state,
            invocation,
            tx_id: tx_id.into(),
            channel_id: channel_id.into(),
            effects: TransactionEffects::default(),
        }
    }

    /// Consumes the stub, returning the effects requested by the transaction.
    pub fn into_effects(self) -> TransactionEffects {
        self.effects
    }
}

impl ChaincodeStub for TransactionStub<'_> {
    fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        if key.is_empty() {
            return Err(StubError::EmptyKey);
        }
        Ok(self.state.get(key).map(<[u8]>::to_vec))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError> {
        if key.is_empty() {
            return Err(StubError::EmptyKey);
        }
        self.effects.writes.insert(key.to_owned(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StubError> {
        if key.is_empty() {
            return Err(StubError::EmptyKey);
        }
        self.effects.writes.insert(key.to_owned(), None);
        Ok(())
    }

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), StubError> {
        if name.is_empty() {
            return Err(StubError::EmptyEventName);
        }
        self.effects.event = Some(ChaincodeEvent {
            name: name.to_owned(),
            payload,
        });
        Ok(())
    }
}
