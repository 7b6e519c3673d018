//! Report builders: each struct assembles one report shape from the
//! aggregation queries in `db::stats`. Builders are read-only and tolerate
//! empty scopes: zero totals and empty lists, never an error.

pub mod district;
pub mod election;
pub mod governorate;
pub mod special;
pub mod subdistrict;
pub mod unit;
