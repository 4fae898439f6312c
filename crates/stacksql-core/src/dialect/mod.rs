//! SQL dialects.
//!
//! A dialect is a stack machine: the builder calls one method per operator in
//! post-order, each method pops its operands off the dialect's
//! [`RenderStack`] and pushes the rendered result. Most operators render the
//! same way everywhere and are provided by [`SqlDialect`]; dialects override
//! quoting, the current-timestamp literal, date arithmetic and the decoding
//! of dates.
//!
//! A dialect instance is stateful and compiles exactly one statement at a
//! time. Create a fresh instance (or call [`SqlDialect::reset`]) for every
//! statement.

mod h2;
mod mysql;

pub use h2::H2Dialect;
pub use mysql::MySqlDialect;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::driver::ResultCursor;
use crate::error::Result;
use crate::param::Parameter;
use crate::period::{self, ShiftDirection};
use crate::segment::Segment;
use crate::stack::RenderStack;

/// Rendering and decoding strategy for one target database.
pub trait SqlDialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the render stack.
    fn stack(&self) -> &RenderStack;

    /// Returns the render stack for modification.
    fn stack_mut(&mut self) -> &mut RenderStack;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '`'
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }

    /// Returns the current-timestamp expression.
    fn now_literal(&self) -> &'static str {
        "NOW()"
    }

    /// Renders `base` shifted by a strictly positive `span`.
    fn render_shift(&self, base: &str, span: TimeDelta, direction: ShiftDirection) -> String;

    /// Decodes the logical date of a column.
    fn date_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<NaiveDateTime>>;

    // Sources and values

    /// Pushes a quoted table name.
    fn table(&mut self, name: &str) {
        let sql = self.quote_identifier(name);
        self.stack_mut().push_sql(sql);
    }

    /// Pushes a quoted column name.
    fn column(&mut self, name: &str) {
        let sql = self.quote_identifier(name);
        self.stack_mut().push_sql(sql);
    }

    /// Pushes a table-qualified column name.
    fn qualified_column(&mut self, table: &str, name: &str) {
        let sql = format!(
            "{}.{}",
            self.quote_identifier(table),
            self.quote_identifier(name)
        );
        self.stack_mut().push_sql(sql);
    }

    /// Pushes a `?` placeholder carrying `value`.
    fn constant(&mut self, value: Parameter) {
        self.stack_mut().push(Segment::placeholder(value));
    }

    /// Starts a column list. The first item already on the stack is the list.
    fn column_list(&mut self) {}

    /// Appends the top item to the list below it.
    fn add_to_list(&mut self) {
        self.stack_mut()
            .binary("add_to_list", |list, item| format!("{list}, {item}"));
    }

    /// Renders a SELECT over the source below the column list.
    ///
    /// A SELECT rendered while an outer segment is still pending is a
    /// subquery and gets parenthesized.
    fn select(&mut self) {
        let stack = self.stack_mut();
        let columns = stack.pop("select");
        let source = stack.pop("select");
        let sql = if stack.is_empty() {
            format!("SELECT {columns} FROM {source}")
        } else {
            format!("(SELECT {columns} FROM {source})")
        };
        stack.push(Segment::compose(sql, [columns, source]));
    }

    /// Aliases the top value.
    fn rename(&mut self, alias: &str) {
        self.stack_mut().unary("rename", |value| {
            if value.sql().starts_with("SELECT ") {
                format!("({value}) AS {alias}")
            } else {
                format!("{value} AS {alias}")
            }
        });
    }

    // Clauses

    /// Filters the source with the condition on top.
    fn where_clause(&mut self) {
        self.stack_mut()
            .binary("where", |source, condition| format!("{source} WHERE {condition}"));
    }

    /// Filters grouped rows with the condition on top.
    fn having(&mut self) {
        self.stack_mut()
            .binary("having", |source, condition| format!("{source} HAVING {condition}"));
    }

    /// Orders the source by the key on top.
    fn order(&mut self) {
        self.stack_mut()
            .binary("order", |source, key| format!("{source} ORDER BY {key}"));
    }

    /// Groups the source by the key on top.
    fn group(&mut self) {
        self.stack_mut()
            .binary("group", |source, key| format!("{source} GROUP BY {key}"));
    }

    /// Marks the key on top as descending.
    fn desc_key(&mut self) {
        self.stack_mut().unary("desc_key", |key| format!("{key} DESC"));
    }

    /// Limits the source to `count` rows.
    fn limit(&mut self, count: u64) {
        self.stack_mut()
            .unary("limit", |source| format!("{source} LIMIT {count}"));
    }

    /// Limits the source to `count` rows after skipping `offset`.
    fn limit_with_offset(&mut self, count: u64, offset: u64) {
        self.stack_mut().unary("limit_with_offset", |source| {
            format!("{source} LIMIT {count} OFFSET {offset}")
        });
    }

    // Boolean and arithmetic operators

    /// `(left) AND (right)`.
    fn and(&mut self) {
        self.stack_mut()
            .binary("and", |left, right| format!("({left}) AND ({right})"));
    }

    /// `(left) OR (right)`.
    fn or(&mut self) {
        self.stack_mut()
            .binary("or", |left, right| format!("({left}) OR ({right})"));
    }

    /// `left = right`.
    fn eq(&mut self) {
        self.stack_mut()
            .binary("eq", |left, right| format!("{left} = {right}"));
    }

    /// `left > right`.
    fn greater(&mut self) {
        self.stack_mut()
            .binary("greater", |left, right| format!("{left} > {right}"));
    }

    /// `left + right`.
    fn add(&mut self) {
        self.stack_mut()
            .binary("add", |left, right| format!("{left} + {right}"));
    }

    /// `left - right`.
    fn subtraction(&mut self) {
        self.stack_mut()
            .binary("subtraction", |left, right| format!("{left} - {right}"));
    }

    // Joins

    /// `(left LEFT JOIN right ON condition)`.
    fn left_join(&mut self) {
        self.stack_mut().ternary("left_join", |left, right, on| {
            format!("({left} LEFT JOIN {right} ON {on})")
        });
    }

    /// `(left RIGHT JOIN right ON condition)`.
    fn right_join(&mut self) {
        self.stack_mut().ternary("right_join", |left, right, on| {
            format!("({left} RIGHT JOIN {right} ON {on})")
        });
    }

    /// `(left INNER JOIN right ON condition)`.
    fn inner_join(&mut self) {
        self.stack_mut().ternary("inner_join", |left, right, on| {
            format!("({left} INNER JOIN {right} ON {on})")
        });
    }

    /// `(left FULL OUTER JOIN right ON condition)`.
    fn outer_join(&mut self) {
        self.stack_mut().ternary("outer_join", |left, right, on| {
            format!("({left} FULL OUTER JOIN {right} ON {on})")
        });
    }

    // Aggregates and functions

    /// `MAX(value)`.
    fn max(&mut self) {
        self.stack_mut().unary("max", |value| format!("MAX({value})"));
    }

    /// `MIN(value)`.
    fn min(&mut self) {
        self.stack_mut().unary("min", |value| format!("MIN({value})"));
    }

    /// `SUM(value)`.
    fn sum(&mut self) {
        self.stack_mut().unary("sum", |value| format!("SUM({value})"));
    }

    /// `COUNT(value)`.
    fn count(&mut self) {
        self.stack_mut().unary("count", |value| format!("COUNT({value})"));
    }

    /// Pushes the current timestamp.
    fn now(&mut self) {
        let sql = self.now_literal();
        self.stack_mut().push_sql(sql);
    }

    /// Moves the instant on top later by `period`.
    fn add_period(&mut self, period: TimeDelta) {
        shift(self, "add_period", ShiftDirection::Forward, period);
    }

    /// Moves the instant on top earlier by `period`.
    fn sub_period(&mut self, period: TimeDelta) {
        shift(self, "sub_period", ShiftDirection::Backward, period);
    }

    // Statements

    /// `INSERT INTO table VALUES (values)`.
    fn insert(&mut self, table: &str) {
        let table = self.quote_identifier(table);
        self.stack_mut().unary("insert", |values| {
            format!("INSERT INTO {table} VALUES ({values})")
        });
    }

    /// `INSERT INTO table (columns) VALUES (values)`.
    fn insert_with_columns(&mut self, table: &str) {
        let table = self.quote_identifier(table);
        self.stack_mut().binary("insert_with_columns", |columns, values| {
            format!("INSERT INTO {table} ({columns}) VALUES ({values})")
        });
    }

    /// `left = right` inside a SET clause.
    fn assign(&mut self) {
        self.stack_mut()
            .binary("assign", |left, right| format!("{left} = {right}"));
    }

    /// Starts an assignment list. The first assignment already on the stack is the list.
    fn assign_list(&mut self) {}

    /// Appends the assignment on top to the list below it.
    fn add_assign(&mut self) {
        self.stack_mut()
            .binary("add_assign", |list, assign| format!("{list}, {assign}"));
    }

    /// `UPDATE table SET assigns WHERE filter`.
    fn update_with_filter(&mut self) {
        self.stack_mut()
            .ternary("update_with_filter", |table, assigns, filter| {
                format!("UPDATE {table} SET {assigns} WHERE {filter}")
            });
    }

    /// `UPDATE table SET assigns`.
    fn update_all(&mut self) {
        self.stack_mut()
            .binary("update_all", |table, assigns| format!("UPDATE {table} SET {assigns}"));
    }

    /// `DELETE FROM table WHERE filter`.
    fn delete(&mut self) {
        self.stack_mut()
            .binary("delete", |table, filter| format!("DELETE FROM {table} WHERE {filter}"));
    }

    /// `DELETE FROM name`. The name is emitted as given.
    fn delete_all(&mut self, name: &str) {
        self.stack_mut().push_sql(format!("DELETE FROM {name}"));
    }

    // Results

    /// Returns the statement rendered so far, if any.
    fn sql(&self) -> Option<&Segment> {
        self.stack().bottom()
    }

    /// Takes the finished statement.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one segment is pending.
    fn finish(&mut self) -> Segment {
        self.stack_mut().finish()
    }

    /// Discards any pending segments so the instance can compile again.
    fn reset(&mut self) {
        self.stack_mut().clear();
    }

    // Decoders

    /// Decodes an 8-bit integer column.
    fn byte_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<i8>> {
        let value = row.get_byte(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a 16-bit integer column.
    fn short_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<i16>> {
        let value = row.get_short(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a 32-bit integer column.
    fn int_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<i32>> {
        let value = row.get_int(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a 64-bit integer column.
    fn long_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<i64>> {
        let value = row.get_long(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a wide integer column.
    fn big_int_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<i128>> {
        let value = row.get_big_int(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a string column.
    fn string_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<String>> {
        let value = row.get_string(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a time-of-day column.
    fn time_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<NaiveTime>> {
        let value = row.get_time(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a timestamp column.
    fn timestamp_result(
        &self,
        row: &dyn ResultCursor,
        name: &str,
    ) -> Result<Option<NaiveDateTime>> {
        let value = row.get_timestamp(name)?;
        Ok(unless_null(row, value))
    }

    /// Decodes a boolean stored as an integer. Any nonzero value is `true`.
    fn bool_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<bool>> {
        let value = row.get_int(name)?;
        Ok(unless_null(row, value).map(|v| v != 0))
    }

    /// Decodes a double column.
    fn double_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<f64>> {
        let value = row.get_double(name)?;
        Ok(unless_null(row, value))
    }
}

/// Returns `value` unless the cell just read from `row` was NULL.
pub fn unless_null<T>(row: &dyn ResultCursor, value: T) -> Option<T> {
    if row.was_null() {
        None
    } else {
        Some(value)
    }
}

fn shift<D: SqlDialect + ?Sized>(
    dialect: &mut D,
    operator: &str,
    direction: ShiftDirection,
    period: TimeDelta,
) {
    let base = dialect.stack_mut().pop(operator);
    let Some((direction, span)) = period::normalize(direction, period) else {
        dialect.stack_mut().push(base);
        return;
    };
    let sql = dialect.render_shift(base.sql(), span, direction);
    dialect.stack_mut().push(Segment::compose(sql, [base]));
}
