// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod cat;
pub mod query;
pub mod scan;
pub mod sign;

pub use cat::cat_command;
pub use query::query_command;
pub use scan::scan_command;
pub use sign::sign_command;
