// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod cli;
pub mod coins;
pub mod commands;
pub mod context;
pub mod feed;
pub mod models;
pub mod notify;
pub mod render;
pub mod session;
pub mod utils;
