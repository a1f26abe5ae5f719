//! `SeaORM` entities for `SqliteTripStore`.

pub mod trip;
