//! Inline positional parameters into SQL text. The remote endpoint executes
//! plain statements, so values are substituted as escaped literals rather
//! than bound at the protocol level.

use serde_json::Value;

/// Replace each `?` in scan order with the matching argument as a SQL
/// literal. Count mismatches are tolerated: once the argument list is
/// exhausted the remaining placeholders become `NULL`, and excess arguments
/// are ignored. Placeholders inside string literals of the template are not
/// recognized; callers keep structural SQL out of argument values.
pub fn inline_params(sql: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return sql.to_owned();
    }
    let mut out = String::with_capacity(sql.len());
    let mut remaining = args.iter();
    for ch in sql.chars() {
        if ch == '?' {
            out.push_str(&literal(remaining.next()));
        } else {
            out.push(ch);
        }
    }
    out
}

fn literal(arg: Option<&Value>) -> String {
    match arg {
        None | Some(Value::Null) => "NULL".to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => if *b { "1" } else { "0" }.to_owned(),
        Some(Value::String(s)) => quoted(s),
        Some(other) => quoted(&other.to_string()),
    }
}

/// Double every single quote, then wrap in single quotes.
fn quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
