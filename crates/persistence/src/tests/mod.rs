// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod calendar_tests;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_customer(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(
            username,
            &format!("{username}@example.com"),
            "Test Customer",
            "pass",
            "Customer",
        )
        .expect("Failed to create test customer")
}

pub fn create_test_staff(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(
            username,
            &format!("{username}@example.com"),
            "Test Staff",
            "pass",
            "Staff",
        )
        .expect("Failed to create test staff")
}
