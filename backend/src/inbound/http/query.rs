//! Query-string parameters shared by the resource handlers.

use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` selector used by update, delete and single-record reads.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Identifier of the target record.
    pub id: i64,
}
