// Namespace-resolved XML element tree with a small path query language
use crate::{Error, Result};
use ahash::AHashSet;
#[cfg(feature = "mmap")]
use memmap2::Mmap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::path::Path as FsPath;

pub const GMD: &str = "http://www.isotc211.org/2005/gmd";
pub const GCO: &str = "http://www.isotc211.org/2005/gco";
pub const GMX: &str = "http://www.isotc211.org/2005/gmx";
pub const GML: &str = "http://www.opengis.net/gml/3.2";
pub const SRV: &str = "http://www.isotc211.org/2005/srv";
pub const XLINK: &str = "http://www.w3.org/1999/xlink";

/// Prefixes understood by path queries
const PREFIXES: &[(&str, &str)] = &[
    ("gmd", GMD),
    ("gco", GCO),
    ("gmx", GMX),
    ("gml", GML),
    ("srv", SRV),
    ("xlink", XLINK),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    text: String,
}

impl Element {
    /// Character data directly inside this element, untrimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }

    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Evaluate a path relative to this element (its children are the first candidates)
    pub fn find_all(&self, query: &str) -> Result<Vec<&Element>> {
        let path = Path::parse(query)?;
        Ok(path.select(vec![self.children.as_slice()]))
    }
}

/// A parsed document: the element tree plus the source it came from
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: Element,
    source: String,
}

impl XmlDocument {
    pub fn parse(source: &str) -> Result<Self> {
        // Skip BOM if present
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        let mut reader = NsReader::from_str(source);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            let (ns, event) = match reader.read_resolved_event() {
                Ok(pair) => pair,
                Err(e) => return Err(Error::Xml(format!("near byte {}: {}", position, e))),
            };
            let namespace = namespace_of(ns);

            match event {
                Event::Start(ref e) => {
                    let element = open_element(&reader, namespace, e)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = open_element(&reader, namespace, e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element)?;
                    }
                }
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
        }
        let root = root.ok_or_else(|| Error::Xml("document has no root element".to_string()))?;

        Ok(Self {
            root,
            source: source.to_string(),
        })
    }

    pub fn parse_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        #[cfg(feature = "mmap")]
        {
            let file = std::fs::File::open(path)?;
            // SAFETY: the map is read once into an owned tree and dropped before returning
            let map = unsafe { Mmap::map(&file)? };
            let text = std::str::from_utf8(&map)
                .map_err(|_| Error::Xml("input is not valid UTF-8".to_string()))?;
            Self::parse(text)
        }
        #[cfg(not(feature = "mmap"))]
        {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Evaluate a path from the document node, so `./gmd:MD_Metadata` selects the root
    pub fn find_all(&self, query: &str) -> Result<Vec<&Element>> {
        let path = Path::parse(query)?;
        Ok(path.select(vec![std::slice::from_ref(&self.root)]))
    }

    /// Stream the raw source and collect the text inside every element whose local
    /// name is in `containers`, at any depth. One entry per outermost container.
    pub fn scan_texts(&self, containers: &[&str]) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(&self.source);
        let mut texts = Vec::new();
        let mut depth = 0usize;
        let mut current = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if containers.contains(&local_name(e)?.as_str()) {
                        depth += 1;
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    let name = std::str::from_utf8(name.as_ref()).unwrap_or("");
                    if depth > 0 && containers.contains(&name) {
                        depth -= 1;
                        if depth == 0 {
                            let text = current.trim();
                            if !text.is_empty() {
                                texts.push(text.to_string());
                            }
                            current.clear();
                        }
                    }
                }
                Ok(Event::Text(ref t)) if depth > 0 => {
                    let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    current.push_str(&text);
                }
                Ok(Event::CData(t)) if depth > 0 => {
                    current.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        Ok(texts)
    }
}

fn namespace_of(ns: ResolveResult) -> Option<String> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    }
}

fn local_name(e: &BytesStart) -> Result<String> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|_| Error::Xml("Invalid UTF-8 in tag name".to_string()))
}

fn open_element(reader: &NsReader<&[u8]>, namespace: Option<String>, e: &BytesStart) -> Result<Element> {
    let mut element = Element {
        namespace,
        name: local_name(e)?,
        ..Element::default()
    };

    for attr in e.attributes().flatten() {
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, name) = reader.resolve_attribute(attr.key);
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        element.attributes.push(Attribute {
            namespace: namespace_of(ns),
            name: String::from_utf8_lossy(name.as_ref()).into_owned(),
            value,
        });
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::Xml("more than one root element".to_string())),
    }
    Ok(())
}

// ============================================================================
// Path queries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq)]
enum NameTest {
    Any,
    /// Unqualified names match the local name in any namespace
    Local(String),
    Qualified { namespace: String, local: String },
}

impl NameTest {
    fn matches(&self, element: &Element) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Local(local) => element.name == *local,
            NameTest::Qualified { namespace, local } => element.is(namespace, local),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// A compiled subset of XPath: `./a/b`, `.//a/b`, `a//b`, `*`,
/// `prefix:name` (prefixes from the fixed table) and `{uri}name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn parse(query: &str) -> Result<Path> {
        let invalid = |reason: &str| Error::Query {
            query: query.to_string(),
            reason: reason.to_string(),
        };

        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        let mut dangling = false;

        for segment in split_segments(query) {
            match segment {
                "" => {
                    axis = Axis::Descendant;
                    dangling = true;
                }
                "." => {}
                _ => {
                    steps.push(Step {
                        axis,
                        test: parse_name_test(segment).map_err(|r| invalid(&r))?,
                    });
                    axis = Axis::Child;
                    dangling = false;
                }
            }
        }

        if steps.is_empty() {
            return Err(invalid("no steps"));
        }
        if dangling {
            return Err(invalid("trailing separator"));
        }
        Ok(Path { steps })
    }

    fn select<'a>(&self, contexts: Vec<&'a [Element]>) -> Vec<&'a Element> {
        let mut contexts = contexts;
        let mut matched: Vec<&'a Element> = Vec::new();

        for step in &self.steps {
            matched = Vec::new();
            let mut seen = AHashSet::new();
            for siblings in &contexts {
                match step.axis {
                    Axis::Child => {
                        for element in siblings.iter() {
                            if step.test.matches(element) && seen.insert(element as *const Element) {
                                matched.push(element);
                            }
                        }
                    }
                    Axis::Descendant => {
                        collect_descendants(siblings, &step.test, &mut seen, &mut matched);
                    }
                }
            }
            contexts = matched.iter().map(|e| e.children.as_slice()).collect();
        }

        matched
    }
}

fn collect_descendants<'a>(
    siblings: &'a [Element],
    test: &NameTest,
    seen: &mut AHashSet<*const Element>,
    out: &mut Vec<&'a Element>,
) {
    for element in siblings {
        if test.matches(element) && seen.insert(element as *const Element) {
            out.push(element);
        }
        collect_descendants(&element.children, test, seen, out);
    }
}

/// Split on `/` outside of `{...}` namespace braces
fn split_segments(query: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_braces = false;

    for (i, ch) in query.char_indices() {
        match ch {
            '{' => in_braces = true,
            '}' => in_braces = false,
            '/' if !in_braces => {
                segments.push(&query[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&query[start..]);
    segments
}

fn parse_name_test(segment: &str) -> std::result::Result<NameTest, String> {
    if segment == "*" {
        return Ok(NameTest::Any);
    }
    if let Some(rest) = segment.strip_prefix('{') {
        let (namespace, local) = rest
            .split_once('}')
            .ok_or_else(|| format!("unterminated namespace in `{}`", segment))?;
        if local.is_empty() {
            return Err(format!("missing local name in `{}`", segment));
        }
        return Ok(NameTest::Qualified {
            namespace: namespace.to_string(),
            local: local.to_string(),
        });
    }
    match segment.split_once(':') {
        Some((prefix, local)) => {
            let namespace = PREFIXES
                .iter()
                .find(|(p, _)| *p == prefix)
                .map(|(_, uri)| *uri)
                .ok_or_else(|| format!("unknown prefix `{}`", prefix))?;
            Ok(NameTest::Qualified {
                namespace: namespace.to_string(),
                local: local.to_string(),
            })
        }
        None => Ok(NameTest::Local(segment.to_string())),
    }
}
