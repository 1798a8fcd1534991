//! How CycloneDX XML elements map onto JSON members.
//!
//! The XML schema differs from the JSON one in a handful of systematic
//! ways: arrays get a wrapper element, some members are attributes, some
//! elements carry their value as text next to attributes, and a few arrays
//! have no wrapper at all. Each rule below names one such difference. Any
//! member without a rule maps to an element of the same name.

use Shape::*;

/// How a member is laid out in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// Plain element: object, text, or (if repeated) several siblings.
    Plain,
    /// `<key><item/>...</key>`
    Wrapped(&'static str),
    /// `<key><item ref="x"/>...</key>`, an array of strings.
    WrappedRefs(&'static str),
    /// `<key><item>text</item>...</key>`, an array of single-field objects.
    WrappedText {
        item: &'static str,
        field: &'static str,
    },
    /// Unwrapped siblings `<element ref="x"/>`, an array of strings.
    RepeatedRefs,
    /// Unwrapped sibling elements, always an array.
    Repeated,
    /// License choice: `<licenses><license/>|<expression/></licenses>`.
    Choice,
    /// Legacy `<tool>` list or the `components`/`services` object form.
    Tools,
    /// Attached text: attributes plus text content in `content`.
    Attached,
}

struct Rule {
    context: Option<&'static str>,
    key: &'static str,
    element: &'static str,
    shape: Shape,
}

const fn any(key: &'static str, shape: Shape) -> Rule {
    Rule {
        context: None,
        key,
        element: key,
        shape,
    }
}

const fn within(context: &'static str, key: &'static str, shape: Shape) -> Rule {
    Rule {
        context: Some(context),
        key,
        element: key,
        shape,
    }
}

const fn renamed(
    context: &'static str,
    key: &'static str,
    element: &'static str,
    shape: Shape,
) -> Rule {
    Rule {
        context: Some(context),
        key,
        element,
        shape,
    }
}

// Context-specific rules come first so they shadow the generic ones.
const RULES: &[Rule] = &[
    within("composition", "dependencies", WrappedRefs("dependency")),
    within("composition", "assemblies", WrappedRefs("assembly")),
    within("composition", "vulnerabilities", WrappedRefs("vulnerability")),
    renamed("dependency", "dependsOn", "dependency", RepeatedRefs),
    renamed("dependency", "provides", "provides", RepeatedRefs),
    within("annotation", "subjects", WrappedRefs("subject")),
    within("vulnerability", "references", Wrapped("reference")),
    within("target", "versions", Wrapped("version")),
    within("service", "data", Wrapped("classification")),
    within("component", "data", Repeated),
    within("evidence", "copyright", WrappedText { item: "text", field: "text" }),
    within("evidence", "identity", Repeated),
    within("declarations", "evidence", Wrapped("evidence")),
    within("credits", "organizations", Wrapped("organization")),
    within("credits", "individuals", Wrapped("individual")),
    within("analysis", "response", Wrapped("response")),
    within("license", "text", Attached),
    within("swid", "text", Attached),
    within("diff", "text", Attached),
    within("supplier", "url", Repeated),
    within("supplier", "contact", Repeated),
    within("manufacturer", "url", Repeated),
    within("manufacturer", "contact", Repeated),
    within("manufacture", "url", Repeated),
    within("manufacture", "contact", Repeated),
    within("provider", "url", Repeated),
    within("provider", "contact", Repeated),
    within("organization", "url", Repeated),
    within("organization", "contact", Repeated),
    any("components", Wrapped("component")),
    any("services", Wrapped("service")),
    any("externalReferences", Wrapped("reference")),
    any("hashes", Wrapped("hash")),
    any("properties", Wrapped("property")),
    any("licenses", Choice),
    any("tools", Tools),
    any("authors", Wrapped("author")),
    any("lifecycles", Wrapped("lifecycle")),
    any("endpoints", Wrapped("endpoint")),
    any("tags", Wrapped("tag")),
    any("omniborId", Repeated),
    any("swhid", Repeated),
    any("ancestors", Wrapped("component")),
    any("descendants", Wrapped("component")),
    any("variants", Wrapped("component")),
    any("commits", Wrapped("commit")),
    any("patches", Wrapped("patch")),
    any("resolves", Wrapped("issue")),
    any("occurrences", Wrapped("occurrence")),
    any("dependencies", Wrapped("dependency")),
    any("compositions", Wrapped("composition")),
    any("vulnerabilities", Wrapped("vulnerability")),
    any("ratings", Wrapped("rating")),
    any("cwes", Wrapped("cwe")),
    any("advisories", Wrapped("advisory")),
    any("affects", Wrapped("target")),
    any("annotations", Wrapped("annotation")),
    any("formulation", Wrapped("formula")),
    any("workflows", Wrapped("workflow")),
    any("tasks", Wrapped("task")),
    any("taskDependencies", Wrapped("dependency")),
    any("runtimeTopology", Wrapped("dependency")),
    any("taskTypes", Wrapped("taskType")),
    any("steps", Wrapped("step")),
    any("commands", Wrapped("command")),
    any("inputs", Wrapped("input")),
    any("outputs", Wrapped("output")),
    any("workspaces", Wrapped("workspace")),
    any("resourceReferences", Wrapped("resourceReference")),
    any("standards", Wrapped("standard")),
    any("requirements", Wrapped("requirement")),
    any("levels", Wrapped("level")),
    any("assessors", Wrapped("assessor")),
    any("attestations", Wrapped("attestation")),
    any("claims", Wrapped("claim")),
];

fn lookup(context: &str, matches: impl Fn(&Rule) -> bool) -> Option<&'static Rule> {
    RULES
        .iter()
        .filter(|rule| rule.context.map_or(true, |c| c == context))
        .find(|rule| matches(rule))
}

/// Rule for JSON member `key` inside element `context`: (element name, shape).
pub(super) fn for_key(context: &str, key: &str) -> (&'static str, Shape) {
    match lookup(context, |rule| rule.key == key) {
        Some(rule) => (rule.element, rule.shape),
        None => ("", Plain),
    }
}

/// Rule for child `element` inside element `context`: (JSON key, shape).
pub(super) fn for_element(context: &str, element: &str) -> (&'static str, Shape) {
    match lookup(context, |rule| rule.element == element) {
        Some(rule) => (rule.key, rule.shape),
        None => ("", Plain),
    }
}

/// Whether JSON member `key` of element `context` is an XML attribute.
pub(super) fn is_attribute(context: &str, key: &str) -> bool {
    match key {
        "bom-ref" | "mime-type" | "alg" | "contentType" | "encoding" => true,
        "type" => !matches!(context, "data" | "trigger" | "event"),
        _ => matches!(
            (context, key),
            ("bom", "serialNumber" | "version")
                | ("dependency", "ref")
                | ("swid", "tagId" | "name" | "version" | "tagVersion" | "patch")
                | ("property", "name")
                | ("classification", "flow")
                | ("license", "acknowledgement")
        ),
    }
}

/// JSON key holding the text of an element that also has attributes.
pub(super) fn text_field(context: &str) -> &'static str {
    match context {
        "property" => "value",
        "classification" => "classification",
        _ => "content",
    }
}

/// Whether `key` is the text content (rather than a child) of `context`.
pub(super) fn is_text_field(context: &str, key: &str) -> bool {
    match context {
        "hash" | "property" | "classification" => text_field(context) == key,
        _ => false,
    }
}

/// XML attribute name for a JSON key.
pub(super) fn attribute_name(key: &str) -> &str {
    match key {
        "contentType" => "content-type",
        other => other,
    }
}

/// JSON key for an XML attribute name.
pub(super) fn attribute_key(name: &str) -> &str {
    match name {
        "content-type" => "contentType",
        other => other,
    }
}

/// Members whose text decodes to a JSON number or boolean.
pub(super) fn typed_value(context: &str, key: &str, text: &str) -> Option<serde_json::Value> {
    match (context, key) {
        ("bom", "version") | (_, "tagVersion" | "cwes") => {
            text.trim().parse::<i64>().ok().map(serde_json::Value::from)
        }
        (_, "score") => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number),
        (_, "modified" | "authenticated" | "x-trust-boundary" | "patch") => {
            text.trim().parse::<bool>().ok().map(serde_json::Value::Bool)
        }
        _ => None,
    }
}
