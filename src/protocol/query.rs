// Copyright 2019 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::handler::KeyValue;
use crate::protocol::{ConversionError, IntoBytes};

/// One entry of a range query response. The record is carried as the raw JSON text found on the
/// ledger; it is never decoded and re-encoded.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Record")]
    record: Box<RawValue>,
}

impl QueryResult {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The stored record, verbatim.
    pub fn record(&self) -> &str {
        self.record.get()
    }

    /// Wraps a ledger entry whose value is expected to hold a JSON document.
    pub fn from_key_value(entry: KeyValue) -> Result<Self, ConversionError> {
        let (id, value) = entry.into_parts();
        let text = String::from_utf8(value).map_err(|err| {
            ConversionError::DeserializationError(format!(
                "Record at key {} is not UTF-8: {}",
                id, err
            ))
        })?;
        let record = RawValue::from_string(text).map_err(|err| {
            ConversionError::DeserializationError(format!(
                "Record at key {} is not JSON: {}",
                id, err
            ))
        })?;

        Ok(QueryResult { id, record })
    }
}

/// An ordered list of query results, encoded as a JSON array.
#[derive(Debug, Default)]
pub struct QueryResultList {
    results: Vec<QueryResult>,
}

impl QueryResultList {
    pub fn new() -> Self {
        QueryResultList::default()
    }

    pub fn push(&mut self, result: QueryResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[QueryResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoBytes for QueryResultList {
    fn into_bytes(self) -> Result<Vec<u8>, ConversionError> {
        serde_json::to_vec(&self.results).map_err(|err| {
            ConversionError::SerializationError(format!(
                "Unable to get bytes from QueryResultList: {}",
                err
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_empty_array() {
        let list = QueryResultList::new();
        assert!(list.is_empty());
        assert_eq!(b"[]".to_vec(), list.into_bytes().unwrap());
    }

    #[test]
    fn test_record_is_carried_verbatim() {
        let record = r#"{"id":"001", "nested": {"b": 1,   "a": [1.50, 2]}}"#;
        let result =
            QueryResult::from_key_value(KeyValue::new("001".into(), record.as_bytes().to_vec()))
                .unwrap();
        assert_eq!("001", result.id());
        assert_eq!(record, result.record());

        let mut list = QueryResultList::new();
        list.push(result);
        let bytes = list.into_bytes().unwrap();
        let expected = format!(r#"[{{"Id":"001","Record":{}}}]"#, record);
        assert_eq!(expected.into_bytes(), bytes);
    }

    #[test]
    fn test_non_json_record() {
        match QueryResult::from_key_value(KeyValue::new("001".into(), b"not json".to_vec())) {
            Err(ConversionError::DeserializationError(_)) => (),
            res => panic!("Expected DeserializationError, got {:?}", res),
        }
        match QueryResult::from_key_value(KeyValue::new("002".into(), vec![0xff, 0xfe])) {
            Err(ConversionError::DeserializationError(_)) => (),
            res => panic!("Expected DeserializationError, got {:?}", res),
        }
    }
}
