// In-memory statement graph with set semantics and insertion order
use crate::namespaces::{self, RDF};
use ahash::{AHashMap, AHashSet};
use serde_json::{json, Map, Value};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal { value: String, datatype: Option<String> },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
        }
    }

    /// IRI, blank node label or lexical form
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Blank(label) => label,
            Term::Literal { value, .. } => value,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    fn write_ntriples(&self, out: &mut String) {
        match self {
            Term::Iri(iri) => {
                let _ = write!(out, "<{}>", iri);
            }
            Term::Blank(label) => {
                let _ = write!(out, "_:{}", label);
            }
            Term::Literal { value, datatype } => {
                out.push('"');
                escape_literal(value, out);
                out.push('"');
                if let Some(dt) = datatype {
                    let _ = write!(out, "^^<{}>", dt);
                }
            }
        }
    }

    fn node_id(&self) -> Option<String> {
        match self {
            Term::Iri(iri) => Some(iri.clone()),
            Term::Blank(label) => Some(format!("_:{}", label)),
            Term::Literal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// Statements in insertion order; a duplicate insert is a no-op
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    index: AHashSet<Triple>,
    blank_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the statement was already present
    pub fn insert(&mut self, subject: Term, predicate: impl Into<String>, object: Term) -> bool {
        let triple = Triple {
            subject,
            predicate: predicate.into(),
            object,
        };
        if self.index.contains(&triple) {
            return false;
        }
        self.index.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Fresh blank node, unique within this graph
    pub fn blank_node(&mut self) -> Term {
        let label = format!("b{}", self.blank_count);
        self.blank_count += 1;
        Term::Blank(label)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.index.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Objects of every statement with this subject and predicate, in insertion order
    pub fn objects<'a>(&'a self, subject: &Term, predicate: &str) -> impl Iterator<Item = &'a Term> + 'a {
        let subject = subject.clone();
        let predicate = predicate.to_string();
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            triple.subject.write_ntriples(&mut out);
            let _ = write!(out, " <{}> ", triple.predicate);
            triple.object.write_ntriples(&mut out);
            out.push_str(" .\n");
        }
        out
    }

    /// Flattened JSON-LD: one node object per subject, in first-seen order
    pub fn to_json_ld(&self) -> String {
        let rdf_type = RDF.term("type");
        let mut order: Vec<String> = Vec::new();
        let mut nodes: AHashMap<String, Map<String, Value>> = AHashMap::new();

        for triple in &self.triples {
            let Some(id) = triple.subject.node_id() else {
                continue;
            };
            let node = nodes.entry(id.clone()).or_insert_with(|| {
                order.push(id.clone());
                let mut node = Map::new();
                node.insert("@id".to_string(), Value::String(id.clone()));
                node
            });

            let (key, value) = if triple.predicate == rdf_type {
                ("@type".to_string(), Value::String(compact(triple.object.value())))
            } else {
                (compact(&triple.predicate), json_ld_value(&triple.object))
            };
            if let Value::Array(values) = node.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
                values.push(value);
            }
        }

        let context: Map<String, Value> = namespaces::ALL
            .iter()
            .map(|ns| (ns.prefix.to_string(), Value::String(ns.iri.to_string())))
            .collect();
        let graph: Vec<Value> = order
            .into_iter()
            .filter_map(|id| nodes.remove(&id))
            .map(Value::Object)
            .collect();

        format!("{:#}", json!({ "@context": context, "@graph": graph }))
    }
}

impl PartialEq for Graph {
    /// Set equality, ignoring insertion order
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && other.iter().all(|t| self.contains(t))
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

fn compact(iri: &str) -> String {
    namespaces::ALL
        .iter()
        .find_map(|ns| ns.compact(iri))
        .unwrap_or_else(|| iri.to_string())
}

fn json_ld_value(term: &Term) -> Value {
    match term {
        Term::Literal { value, datatype } => {
            let mut object = Map::new();
            object.insert("@value".to_string(), Value::String(value.clone()));
            if let Some(dt) = datatype {
                object.insert("@type".to_string(), Value::String(compact(dt)));
            }
            Value::Object(object)
        }
        other => json!({ "@id": other.node_id() }),
    }
}

fn escape_literal(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}
