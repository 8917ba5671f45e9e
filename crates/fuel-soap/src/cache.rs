//! Per-client memory of retrievable and editable properties.
//!
//! The cache never performs I/O; a miss is resolved by the caller through
//! describe. Entries are never invalidated for the lifetime of the client.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use crate::error::{Error, Result};

/// Which property set an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheBucket {
    /// Properties that can be requested in a retrieve.
    Retrievable,
    /// Extended properties that travel as `Attributes` in create/update/delete.
    Editable,
}

/// Property names keyed by bucket and object type.
#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    retrievable: HashMap<String, Vec<String>>,
    editable: HashMap<String, Vec<String>>,
}

impl MetadataCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, bucket: CacheBucket) -> &HashMap<String, Vec<String>> {
        match bucket {
            CacheBucket::Retrievable => &self.retrievable,
            CacheBucket::Editable => &self.editable,
        }
    }

    fn bucket_mut(&mut self, bucket: CacheBucket) -> &mut HashMap<String, Vec<String>> {
        match bucket {
            CacheBucket::Retrievable => &mut self.retrievable,
            CacheBucket::Editable => &mut self.editable,
        }
    }

    /// Cached properties for an object type, if any.
    pub fn get(&self, bucket: CacheBucket, object_type: &str) -> Option<&[String]> {
        self.bucket(bucket).get(object_type).map(Vec::as_slice)
    }

    /// Store properties for an object type and return them.
    pub fn put(
        &mut self,
        bucket: CacheBucket,
        object_type: impl Into<String>,
        properties: Vec<String>,
    ) -> Vec<String> {
        let object_type = object_type.into();
        trace!(?bucket, object_type = %object_type, count = properties.len(), "Caching properties");
        self.bucket_mut(bucket)
            .insert(object_type, properties.clone());
        properties
    }

    /// Store a loosely-typed property list.
    ///
    /// Fails unless `properties` is a list of strings.
    pub fn put_value(
        &mut self,
        bucket: CacheBucket,
        object_type: impl Into<String>,
        properties: &Value,
    ) -> Result<Vec<String>> {
        let list = properties
            .as_array()
            .ok_or_else(|| Error::malformed("Properties should be in cache as a list"))?;

        let names = list
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::malformed("Properties should be in cache as a list of names"))?;

        Ok(self.put(bucket, object_type, names))
    }

    /// Returns true if an entry exists.
    pub fn contains(&self, bucket: CacheBucket, object_type: &str) -> bool {
        self.bucket(bucket).contains_key(object_type)
    }

    /// Number of entries across both buckets.
    pub fn len(&self) -> usize {
        self.retrievable.len() + self.editable.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
