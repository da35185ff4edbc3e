//! Line-oriented reader and writer for the subset of YAML used by kubeconfig files.
//!
//! The reader is permissive: any line it does not recognize is skipped and
//! decoding never fails. It walks the document with a [`LineCursor`] that the
//! top-level scan hands to the block scans for `contexts:`, `clusters:`,
//! `users:` and `preferences:`, so every line is visited exactly once.
//!
//! The writer emits a fixed layout with two-space indentation. It only writes
//! what this tool understands: clusters keep `name` and `server`, users keep
//! their `name`. Certificate and credential fields are dropped on write.

use crate::model::{
    Cluster, Config, Context, ModelError, User, UserAuth, DEFAULT_API_VERSION, DEFAULT_KIND,
};
use std::borrow::Cow;
use tracing::{debug, trace};

pub const KEY_API_VERSION: &str = "apiVersion";
pub const KEY_KIND: &str = "kind";
pub const KEY_CURRENT_CONTEXT: &str = "current-context";
pub const KEY_PREFERENCES: &str = "preferences";
pub const KEY_CONTEXTS: &str = "contexts";
pub const KEY_CLUSTERS: &str = "clusters";
pub const KEY_USERS: &str = "users";

const INDENT: &str = "  ";
const EMPTY_MAPPING: &str = "{}";

/// Explicit position over the lines of a document.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> LineCursor<'a> {
        LineCursor {
            lines: text.lines().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.position += 1;
        Some(line)
    }
}

/// A `key: value` pair read inside a list item.
#[derive(Debug, PartialEq)]
struct Field<'a> {
    key: &'a str,
    value: &'a str,
    /// True when the pair sits directly in the item rather than in a nested mapping.
    item_level: bool,
}

/// The fields of one list item, in file order.
#[derive(Debug, Default)]
struct Record<'a> {
    fields: Vec<Field<'a>>,
}

/// Where the block scan is within a list region.
enum BlockState<'a> {
    BeforeFirstItem,
    InItem {
        marker_indent: usize,
        content_indent: usize,
        record: Record<'a>,
    },
}

fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Unindented mapping keys end any list region. Unindented `- ` lines do not,
/// since kubectl writes sequence items at column zero.
fn is_top_level(line: &str) -> bool {
    match line.chars().next() {
        Some(c) => !c.is_whitespace() && c != '-',
        None => false,
    }
}

fn strip_item_marker(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim_start)
}

fn split_key_value(trimmed: &str) -> Option<(&str, &str)> {
    let (key, value) = trimmed.split_once(':')?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// Trims a raw scalar and removes one level of YAML quoting.
///
/// Quoted scalars are unescaped by serde_yaml. Plain scalars that YAML would
/// type as numbers, booleans or null keep their source text.
fn scalar(raw: &str) -> String {
    let raw = raw.trim();
    match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(serde_yaml::Value::String(value)) => value,
        _ => raw.to_string(),
    }
}

/// Reads the items of a list region, leaving the cursor on the next top-level line.
fn read_records<'a>(cursor: &mut LineCursor<'a>) -> Vec<Record<'a>> {
    let mut records = Vec::new();
    let mut state = BlockState::BeforeFirstItem;

    while let Some(line) = cursor.peek() {
        if is_ignorable(line) {
            cursor.advance();
            continue;
        }
        if is_top_level(line) {
            break;
        }
        cursor.advance();

        let indent = indentation(line);
        let trimmed = line.trim();

        let starts_item = match (&state, strip_item_marker(trimmed)) {
            (BlockState::BeforeFirstItem, Some(body)) => Some(body),
            (BlockState::InItem { marker_indent, .. }, Some(body)) if *marker_indent == indent => {
                Some(body)
            }
            _ => None,
        };

        if let Some(body) = starts_item {
            let previous = std::mem::replace(
                &mut state,
                BlockState::InItem {
                    marker_indent: indent,
                    content_indent: indent + (trimmed.len() - body.len()),
                    record: Record::default(),
                },
            );
            if let BlockState::InItem { record, .. } = previous {
                records.push(record);
            }
            if let (BlockState::InItem { record, .. }, Some((key, value))) =
                (&mut state, split_key_value(body))
            {
                record.fields.push(Field {
                    key,
                    value,
                    item_level: true,
                });
            }
            continue;
        }

        match &mut state {
            BlockState::InItem {
                content_indent,
                record,
                ..
            } => {
                if let Some((key, value)) = split_key_value(trimmed) {
                    record.fields.push(Field {
                        key,
                        value,
                        item_level: indent == *content_indent,
                    });
                }
            }
            BlockState::BeforeFirstItem => {
                trace!("skipping line outside of a list item: {}", line)
            }
        }
    }

    if let BlockState::InItem { record, .. } = state {
        records.push(record);
    }
    records
}

fn context_from_record(record: &Record) -> Result<Context, ModelError> {
    let mut builder = Context::builder();
    for field in &record.fields {
        match (field.key, field.item_level) {
            ("name", true) => builder.name(scalar(field.value)),
            ("cluster", _) => builder.cluster(scalar(field.value)),
            ("user", _) => builder.user(scalar(field.value)),
            ("namespace", _) => builder.namespace(scalar(field.value)),
            _ => &mut builder,
        };
    }
    builder.build()
}

fn cluster_from_record(record: &Record) -> Result<Cluster, ModelError> {
    let mut builder = Cluster::builder();
    for field in &record.fields {
        match (field.key, field.item_level) {
            ("name", true) => builder.name(scalar(field.value)),
            ("server", _) => builder.server(scalar(field.value)),
            ("certificate-authority", _) => builder.certificate_authority(scalar(field.value)),
            ("certificate-authority-data", _) => {
                builder.certificate_authority_data(scalar(field.value))
            }
            _ => &mut builder,
        };
    }
    builder.build()
}

fn user_from_record(record: &Record) -> Result<User, ModelError> {
    let mut name = None;
    let mut auth = UserAuth::default();
    for field in &record.fields {
        let slot = match (field.key, field.item_level) {
            ("name", true) => &mut name,
            ("username", _) => &mut auth.username,
            ("password", _) => &mut auth.password,
            ("token", _) => &mut auth.token,
            ("client-certificate", _) => &mut auth.client_certificate,
            ("client-certificate-data", _) => &mut auth.client_certificate_data,
            ("client-key", _) => &mut auth.client_key,
            ("client-key-data", _) => &mut auth.client_key_data,
            _ => continue,
        };
        slot.get_or_insert_with(|| scalar(field.value));
    }

    match name {
        Some(name) => Ok(User::new(name, auth)),
        None => Err(ModelError::MissingPropertyValue {
            name: "name".to_string(),
        }),
    }
}

fn read_preferences(cursor: &mut LineCursor, inline: &str, config: &mut Config) {
    if !inline.is_empty() && inline != EMPTY_MAPPING {
        config.set_preference(String::new(), scalar(inline));
    }
    while let Some(line) = cursor.peek() {
        if is_top_level(line) {
            break;
        }
        cursor.advance();
        if let Some((key, value)) = split_key_value(line.trim()) {
            config.set_preference(key.to_string(), scalar(value));
        }
    }
}

/// Decodes a kubeconfig document. Unrecognized lines are skipped.
pub fn decode(text: &str) -> Config {
    let mut config = Config {
        api_version: String::new(),
        kind: String::new(),
        ..Config::default()
    };
    let mut cursor = LineCursor::new(text);

    while let Some(line) = cursor.advance() {
        if is_ignorable(line) {
            continue;
        }
        let Some((key, value)) = split_key_value(line.trim()) else {
            continue;
        };

        match (is_top_level(line), key) {
            (_, KEY_CURRENT_CONTEXT) => config.current_context = scalar(value),
            (true, KEY_API_VERSION) => config.set_api_version(scalar(value)),
            (true, KEY_KIND) => config.set_kind(scalar(value)),
            (true, KEY_PREFERENCES) => read_preferences(&mut cursor, value, &mut config),
            (true, KEY_CONTEXTS) => {
                for record in read_records(&mut cursor) {
                    match context_from_record(&record) {
                        Ok(context) => config.push_context(context),
                        Err(e) => trace!("skipping context entry: {}", e),
                    }
                }
            }
            (true, KEY_CLUSTERS) => {
                for record in read_records(&mut cursor) {
                    match cluster_from_record(&record) {
                        Ok(cluster) => config.push_cluster(cluster),
                        Err(e) => trace!("skipping cluster entry: {}", e),
                    }
                }
            }
            (true, KEY_USERS) => {
                for record in read_records(&mut cursor) {
                    match user_from_record(&record) {
                        Ok(user) => config.push_user(user),
                        Err(e) => trace!("skipping user entry: {}", e),
                    }
                }
            }
            _ => trace!("skipping unrecognized line: {}", line),
        }
    }

    if config.api_version.is_empty() {
        config.api_version = DEFAULT_API_VERSION.to_string();
    }
    if config.kind.is_empty() {
        config.kind = DEFAULT_KIND.to_string();
    }

    config
}

/// Characters that must never reach the file unescaped, since every value
/// has to stay on its own line.
fn needs_escape(c: char) -> bool {
    c.is_control() || c == '\u{2028}' || c == '\u{2029}'
}

fn double_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if needs_escape(c) => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Formats a string value as a single-line YAML scalar that reads back as
/// the same string.
fn quote(value: &str) -> Cow<'_, str> {
    if value.chars().any(needs_escape) {
        return Cow::Owned(double_quoted(value));
    }

    match serde_yaml::to_string(&serde_yaml::Value::String(value.to_string())) {
        Ok(formatted) => {
            let formatted = formatted.trim_end_matches('\n');
            if formatted == value {
                Cow::Borrowed(value)
            } else if formatted.contains('\n') {
                // the emitter folded a long value across lines
                Cow::Owned(double_quoted(value))
            } else {
                Cow::Owned(formatted.to_string())
            }
        }
        Err(e) => {
            trace!("falling back to double quotes for {:?}: {}", value, e);
            Cow::Owned(double_quoted(value))
        }
    }
}

fn write_field(out: &mut String, depth: usize, key: &str, value: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(key);
    out.push(':');
    if !value.is_empty() {
        out.push(' ');
        out.push_str(&quote(value));
    }
    out.push('\n');
}

fn write_item(out: &mut String, depth: usize, key: &str, value: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str("- ");
    write_field(out, 0, key, value);
}

fn write_raw(out: &mut String, depth: usize, key: &str, raw: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(key);
    out.push_str(": ");
    out.push_str(raw);
    out.push('\n');
}

/// Encodes a config into the fixed kubeconfig layout.
pub fn encode(config: &Config) -> String {
    let mut out = String::new();

    write_field(&mut out, 0, KEY_API_VERSION, config.api_version());
    write_field(&mut out, 0, KEY_KIND, config.kind());
    write_field(&mut out, 0, KEY_CURRENT_CONTEXT, config.current_context());

    if !config.preferences().is_empty() {
        write_raw(&mut out, 0, KEY_PREFERENCES, EMPTY_MAPPING);
    }

    write_field(&mut out, 0, KEY_CONTEXTS, "");
    for context in config.contexts() {
        write_item(&mut out, 1, "name", context.name());
        write_field(&mut out, 2, "context", "");
        write_field(&mut out, 3, "cluster", context.cluster());
        write_field(&mut out, 3, "user", context.user());
        if !context.namespace().is_empty() {
            write_field(&mut out, 3, "namespace", context.namespace());
        }
    }

    if !config.clusters().is_empty() {
        write_field(&mut out, 0, KEY_CLUSTERS, "");
        for cluster in config.clusters() {
            if cluster.certificate_authority().is_some()
                || cluster.certificate_authority_data().is_some()
            {
                debug!("Not writing certificate authority of cluster {:?}", cluster.name());
            }
            write_item(&mut out, 1, "name", cluster.name());
            write_field(&mut out, 2, "cluster", "");
            write_field(&mut out, 3, "server", cluster.server());
        }
    }

    if !config.users().is_empty() {
        write_field(&mut out, 0, KEY_USERS, "");
        for user in config.users() {
            if !user.auth().is_empty() {
                debug!("Not writing credentials of user {:?}", user.name());
            }
            write_item(&mut out, 1, "name", user.name());
            write_raw(&mut out, 2, "user", EMPTY_MAPPING);
        }
    }

    out
}
