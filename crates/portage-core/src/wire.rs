//! JSON encoding of the patient collection as exchanged with the
//! persistence backend.

use crate::error::CoreError;
use crate::models::Child;

pub fn encode_collection(children: &[Child]) -> Result<Vec<u8>, CoreError> {
    Ok(serde_json::to_vec_pretty(children)?)
}

pub fn decode_collection(bytes: &[u8]) -> Result<Vec<Child>, CoreError> {
    Ok(serde_json::from_slice(bytes)?)
}
