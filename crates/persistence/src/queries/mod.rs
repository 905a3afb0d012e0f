// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only complaint queries.

pub mod complaints;

pub use complaints::{count_complaints, get_complaint, list_complaints};
