//! Compile-only tests for the typed selector surface.
//!
//! These tests verify that the accepted comparand and predicate shapes
//! compile. Rejected shapes are covered by `compile_fail` doc tests on
//! `Comparand` and `IntoPredicate`.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use sqlfluent::prelude::*;
use sqlfluent::{DriverCommand, DriverError, Expr, Lambda, Row};

#[derive(Debug, Clone, Copy, Default, PartialEq, SqlEnum)]
enum Tier {
    #[default]
    Free,
    Paid,
}

#[derive(Debug, Clone, Default, Entity)]
struct CompileAccount {
    id: i64,
    owner: String,
    score: i32,
    verified: bool,
    tier: Tier,
    note: Option<String>,
    opened_at: NaiveDateTime,
}

struct NoDriver;

impl Driver for NoDriver {
    fn kind(&self) -> &str {
        "SQLiteConnection"
    }

    fn execute_non_query(&self, _: &DriverCommand<'_>) -> Result<u64, DriverError> {
        Ok(0)
    }

    fn execute_scalar(&self, _: &DriverCommand<'_>) -> Result<Value, DriverError> {
        Ok(Value::Null)
    }

    fn execute_reader(&self, _: &DriverCommand<'_>) -> Result<Vec<Row>, DriverError> {
        Ok(Vec::new())
    }
}

// ── Compile checks ──────────────────────────────────────────────────────────

#[test]
fn compile_comparands_match_field_types() {
    let _ = || -> OrmResult<()> {
        let owner = String::from("Bob");
        let note: Option<String> = None;
        let score: Option<i32> = Some(3);
        let f = CompileAccount::fields;

        let _ = f().id.eq(1);
        let _ = f().id.ne(&7_i64);
        let _ = f().score.gt(score);
        let _ = f().score.le(&score);
        let _ = f().owner.eq("Bob");
        let _ = f().owner.ne(&owner);
        let _ = f().owner.eq(owner.clone());
        let _ = f().note.eq(&note);
        let _ = f().note.ne(None);
        let _ = f().tier.eq(Tier::Paid);
        let _ = f().opened_at.lt(NaiveDateTime::default());
        Ok(())
    };
}

#[test]
fn compile_predicate_shapes() {
    let _ = || -> OrmResult<()> {
        let db = NoDriver;
        let raw = Lambda::<CompileAccount>::from_body(Expr::constant(true));
        let _ = db
            .select::<CompileAccount>()?
            .star()
            .where_(|a| a.verified)?
            .and_where(|a| !a.verified)?
            .and_where(|a| a.score.ge(10))?
            .where_if(|_| raw, false)?
            .order_by(|a| a.owner)?
            .to_sql();
        Ok(())
    };
}

#[test]
fn compile_selectors_accept_any_field() {
    let _ = || -> OrmResult<()> {
        let db = NoDriver;
        let account = CompileAccount::default();
        let _ = db
            .insert(&account)?
            .column(|a| a.owner)?
            .column(|a| a.note)?
            .column_as(|a| a.tier, "Plan")?
            .to_parameters();
        let _ = db.select::<CompileAccount>()?.max(|a| a.opened_at)?;
        Ok(())
    };
}
