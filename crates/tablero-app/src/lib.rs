// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod model;
pub mod staging;
pub mod state;
pub mod value;

pub use model::*;
pub use staging::*;
pub use state::*;
pub use value::*;
