// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod coins;
pub mod dashboard;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod session;
pub mod subscriptions;
pub mod transactions;
