// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Shared per-invocation state. Caches are explicit and owned here rather
//! than hiding in module statics, so every command path invalidates them
//! through the same two methods.

use std::cell::RefCell;

use crate::api::{ApiClient, ApiError};
use crate::models::{Account, Category};
use crate::session::Session;

pub struct Context {
    pub api: ApiClient,
    pub session: Session,
    categories: RefCell<Option<Vec<Category>>>,
    default_account: RefCell<Option<Account>>,
}

impl Context {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            categories: RefCell::new(None),
            default_account: RefCell::new(None),
        }
    }

    /// Category list, fetched once per invocation unless invalidated.
    pub fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(cached) = self.categories.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let fetched = self.api.categories()?;
        *self.categories.borrow_mut() = Some(fetched.clone());
        Ok(fetched)
    }

    /// Drop the cached category list. Call after any create, rename, delete
    /// or merge.
    pub fn invalidate_categories(&self) {
        *self.categories.borrow_mut() = None;
    }

    /// Case-insensitive lookup of a category id by name.
    pub fn category_id_by_name(&self, name: &str) -> Result<Option<i64>, ApiError> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .categories()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == needle)
            .map(|c| c.id))
    }

    /// Account used when a transaction does not name one. Prefers the CASH
    /// account, falls back to the first listed.
    pub fn default_account(&self, force_refresh: bool) -> Result<Option<Account>, ApiError> {
        if !force_refresh {
            if let Some(cached) = self.default_account.borrow().as_ref() {
                return Ok(Some(cached.clone()));
            }
        }
        let accounts = self.api.accounts()?;
        let chosen = accounts
            .iter()
            .find(|a| a.account_type.eq_ignore_ascii_case("CASH"))
            .or_else(|| accounts.first())
            .cloned();
        *self.default_account.borrow_mut() = chosen.clone();
        Ok(chosen)
    }
}
