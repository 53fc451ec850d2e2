// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod columns;
pub mod ids;
pub mod model;
pub mod nav;
pub mod seed;
pub mod sort;
pub mod state;

pub use columns::*;
pub use ids::*;
pub use model::*;
pub use nav::*;
pub use seed::*;
pub use sort::*;
pub use state::*;
