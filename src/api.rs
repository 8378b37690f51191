// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed client for the OverSave REST backend. Every call carries the bearer
//! token; a missing token fails before any request goes out.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Account, BudgetSummary, CashflowRecord, Category, CategoryMergeRequest, CoinBalance,
    CoinEvent, ContributionRequest, ContributionResponse, CreateGoalRequest, DashboardData,
    FinancialAggregates, Goal, GrantRequest, GrantResponse, NewCashflow, RedeemRequest,
    RedeemResponse, RewardItem, SetBudgetRequest, Subscription, SubscriptionRequest,
};

const UA: &str = concat!(
    "oversave/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/oversave/oversave-client)"
);

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Failure taxonomy for backend calls: transport, non-2xx with an optional
/// JSON error body, or a missing session token caught before any request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated; set a session token first")]
    NotAuthenticated,
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Category row from /api/budget/categories (id is named categoryId there).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub category_id: i64,
    pub name: String,
}

pub struct ApiClient {
    base: String,
    token: Option<String>,
    user_id: Option<i64>,
    http: Client,
}

impl ApiClient {
    pub fn new(
        base: impl Into<String>,
        token: Option<String>,
        user_id: Option<i64>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(Self {
            base: base.into().trim_end_matches('/').to_string(),
            token,
            user_id,
            http,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        let mut builder = builder.bearer_auth(token);
        if let Some(id) = self.user_id {
            builder = builder.header("X-USER-ID", id);
        }
        Ok(builder)
    }

    fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        // Error bodies are {"message": ...} or {"error": ...} when present.
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str().map(str::to_string))
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let resp = self.authed(self.http.get(self.url(path)))?.send()?;
        Ok(Self::check(resp)?.json()?)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let resp = self.authed(self.http.post(self.url(path)))?.json(body).send()?;
        Ok(Self::check(resp)?.json()?)
    }

    fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("PATCH {}", path);
        let resp = self
            .authed(self.http.patch(self.url(path)))?
            .json(body)
            .send()?;
        Ok(Self::check(resp)?.json()?)
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", path);
        let resp = self.authed(self.http.delete(self.url(path)))?.send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("DELETE {}", path);
        let resp = self.authed(self.http.delete(self.url(path)))?.send()?;
        Ok(Self::check(resp)?.json()?)
    }

    // Income / expenses

    pub fn list_income(&self) -> Result<Vec<CashflowRecord>, ApiError> {
        self.get_json("/api/income")
    }

    pub fn list_expenses(&self) -> Result<Vec<CashflowRecord>, ApiError> {
        self.get_json("/api/expenses")
    }

    pub fn add_income(&self, req: &NewCashflow) -> Result<CashflowRecord, ApiError> {
        self.post_json("/api/income", req)
    }

    pub fn add_expense(&self, req: &NewCashflow) -> Result<CashflowRecord, ApiError> {
        self.post_json("/api/expenses", req)
    }

    // Categories

    pub fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/api/categories")
    }

    pub fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        self.post_json("/api/categories", &serde_json::json!({ "name": name }))
    }

    pub fn rename_category(&self, id: i64, name: &str) -> Result<Category, ApiError> {
        self.patch_json(
            &format!("/api/categories/{}", id),
            &serde_json::json!({ "name": name }),
        )
    }

    pub fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/categories/{}", id))
    }

    /// Merge is one server round trip; the client does not compensate on
    /// failure.
    pub fn merge_categories(
        &self,
        req: &CategoryMergeRequest,
        merge_budgets: Option<bool>,
    ) -> Result<serde_json::Value, ApiError> {
        let path = match merge_budgets {
            Some(v) => format!("/api/categories/merge?mergeBudgets={}", v),
            None => "/api/categories/merge".to_string(),
        };
        self.post_json(&path, req)
    }

    // Budgets

    pub fn budget_categories(&self) -> Result<Vec<BudgetCategory>, ApiError> {
        self.get_json("/api/budget/categories")
    }

    pub fn set_budget(&self, req: &SetBudgetRequest) -> Result<serde_json::Value, ApiError> {
        self.post_json("/api/budget/set", req)
    }

    pub fn budget_summary(&self, category_id: i64) -> Result<BudgetSummary, ApiError> {
        self.get_json(&format!("/api/budget/summary/{}", category_id))
    }

    pub fn delete_budget(&self, category_id: i64) -> Result<serde_json::Value, ApiError> {
        self.delete_json(&format!("/api/budget/delete/{}", category_id))
    }

    // Goals

    pub fn goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/api/goals")
    }

    pub fn goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.get_json(&format!("/api/goals/{}", id))
    }

    pub fn create_goal(&self, req: &CreateGoalRequest) -> Result<Goal, ApiError> {
        self.post_json("/api/goals", req)
    }

    pub fn update_goal(&self, id: i64, patch: &serde_json::Value) -> Result<Goal, ApiError> {
        self.patch_json(&format!("/api/goals/{}", id), patch)
    }

    pub fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/goals/{}", id))
    }

    pub fn contribute(&self, req: &ContributionRequest) -> Result<ContributionResponse, ApiError> {
        self.post_json("/api/goals/contribute", req)
    }

    pub fn contributions(
        &self,
        goal_id: i64,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let mut path = format!("/api/goals/{}/contributions", goal_id);
        let mut params = Vec::new();
        if let Some(f) = from {
            params.push(format!("from={}", f));
        }
        if let Some(t) = to {
            params.push(format!("to={}", t));
        }
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }
        self.get_json(&path)
    }

    // Subscriptions

    pub fn subscriptions(&self, active_only: bool) -> Result<Vec<Subscription>, ApiError> {
        self.get_json(&format!("/api/subscriptions?activeOnly={}", active_only))
    }

    pub fn create_subscription(
        &self,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        self.post_json("/api/subscriptions", req)
    }

    pub fn update_subscription(
        &self,
        id: i64,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        debug!("PUT /api/subscriptions/{}", id);
        let resp = self
            .authed(self.http.put(self.url(&format!("/api/subscriptions/{}", id))))?
            .json(req)
            .send()?;
        Ok(Self::check(resp)?.json()?)
    }

    pub fn pause_subscription(&self, id: i64) -> Result<(), ApiError> {
        self.patch_empty(&format!("/api/subscriptions/{}/pause", id))
    }

    pub fn resume_subscription(&self, id: i64) -> Result<(), ApiError> {
        self.patch_empty(&format!("/api/subscriptions/{}/resume", id))
    }

    pub fn delete_subscription(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/subscriptions/{}", id))
    }

    fn patch_empty(&self, path: &str) -> Result<(), ApiError> {
        debug!("PATCH {}", path);
        let resp = self.authed(self.http.patch(self.url(path)))?.send()?;
        Self::check(resp)?;
        Ok(())
    }

    // Accounts

    pub fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.get_json("/api/accounts")
    }

    // Coins

    pub fn coin_balance(&self) -> Result<CoinBalance, ApiError> {
        self.get_json("/api/budgetcoin/balance")
    }

    pub fn grant_coins(&self, req: &GrantRequest) -> Result<GrantResponse, ApiError> {
        self.post_json("/api/budgetcoin/grant", req)
    }

    pub fn redeem_coins(&self, req: &RedeemRequest) -> Result<RedeemResponse, ApiError> {
        self.post_json("/api/budgetcoin/redeem", req)
    }

    pub fn coin_history(&self) -> Result<Vec<CoinEvent>, ApiError> {
        self.get_json("/api/budgetcoin/history")
    }

    pub fn reward_items(&self) -> Result<Vec<RewardItem>, ApiError> {
        self.get_json("/api/budgetcoin/items")
    }

    // Dashboard

    pub fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.get_json("/api/dashboard")
    }

    pub fn financial_aggregates(&self) -> Result<FinancialAggregates, ApiError> {
        self.get_json("/api/dashboard/financial-aggregates")
    }

    pub fn spending_trend(&self, period: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!("/api/dashboard/spending-trend?period={}", period))
    }

    // Server-side CSV export

    pub fn export_transactions_csv(&self, user_id: i64) -> Result<String, ApiError> {
        let path = format!("/api/export/transactions?userId={}", user_id);
        debug!("GET {}", path);
        let resp = self
            .authed(self.http.get(self.url(&path)))?
            .header(reqwest::header::ACCEPT, "text/csv")
            .send()?;
        Ok(Self::check(resp)?.text()?)
    }
}
