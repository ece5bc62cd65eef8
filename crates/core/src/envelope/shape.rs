//! Envelope shapes: where the payload lives and how it is decoded

use std::marker::PhantomData;

use perx_domain::{PagingMeta, PerxError, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

const ITEM_ENTRIES_ERROR: &str = "Failed to deserialize item entries";

/// Key path of the payload inside the response body.
pub trait DataPath {
    const PATH: &'static [&'static str];
}

/// Payload under `data`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataKey;

impl DataPath for DataKey {
    const PATH: &'static [&'static str] = &["data"];
}

/// Payload under `data.rewards` (reward search).
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardsKey;

impl DataPath for RewardsKey {
    const PATH: &'static [&'static str] = &["data", "rewards"];
}

/// Decoding strategy for one family of provider responses.
pub trait Shape {
    /// Decoded payload.
    type Data;
    /// Paging block read from `meta`.
    type Meta: DeserializeOwned;

    /// Pull the payload out of a response body.
    ///
    /// # Errors
    /// `MalformedPayload` when the payload is missing or has the wrong form.
    fn extract(body: &Value) -> Result<Self::Data>;
}

/// Single object under `data`.
#[derive(Debug)]
pub struct Object<T>(PhantomData<T>);

impl<T: DeserializeOwned> Shape for Object<T> {
    type Data = T;
    type Meta = IgnoredAny;

    fn extract(body: &Value) -> Result<T> {
        match lookup(body, DataKey::PATH) {
            None | Some(Value::Null) => Err(PerxError::malformed("response carries no data")),
            Some(data) => T::deserialize(data)
                .map_err(|err| PerxError::malformed(format!("Failed to deserialize data: {err}"))),
        }
    }
}

/// Ordered list at `P` with paging block `M`.
#[derive(Debug)]
pub struct List<T, M = PagingMeta, P = DataKey>(PhantomData<(T, M, P)>);

impl<T, M, P> Shape for List<T, M, P>
where
    T: DeserializeOwned,
    M: DeserializeOwned,
    P: DataPath,
{
    type Data = Vec<T>;
    type Meta = M;

    fn extract(body: &Value) -> Result<Vec<T>> {
        let Some(Value::Array(entries)) = lookup(body, P::PATH) else {
            return Err(PerxError::malformed(ITEM_ENTRIES_ERROR));
        };
        entries
            .iter()
            .map(|entry| {
                T::deserialize(entry)
                    .map_err(|err| PerxError::malformed(format!("{ITEM_ENTRIES_ERROR}: {err}")))
            })
            .collect()
    }
}

/// The whole body, for endpoints that do not wrap their payload.
#[derive(Debug)]
pub struct Root<T>(PhantomData<T>);

impl<T: DeserializeOwned> Shape for Root<T> {
    type Data = T;
    type Meta = IgnoredAny;

    fn extract(body: &Value) -> Result<T> {
        T::deserialize(body)
            .map_err(|err| PerxError::malformed(format!("Failed to deserialize body: {err}")))
    }
}

fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |node, key| node.get(key))
}
