// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint mutations.

pub mod complaints;

pub use complaints::{delete_complaint, insert_complaint, update_complaint};
