// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    /// `tag.class` (tag may be empty for `.a.b`).
    Compound {
        tag: Option<String>,
        classes: Vec<String>,
    },
}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Append another sheet's rules; later rules win ties in the cascade.
    pub fn extend(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }
}

// input: ".a-cursor, span { display: inline-block; } .b { padding: 0; }"
// output: Stylesheet { rules: vec![Rule{ selectors: ..., declarations: ...}, ...] }
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let input = strip_comments(input);
    let mut rules = Vec::new();
    for block in input.split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(parse_selector_one)
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

// input: "color: red; font-size: 12px !important;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim();
            let value = value
                .strip_suffix("!important")
                .map_or(value, str::trim_end)
                .to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// input: "#id", ".class", "div", "*", "pre.a-clone"
// output: Some(Selector::Id("id")), ...
fn parse_selector_one(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s == "*" {
        return Some(Selector::Universal);
    }
    if let Some(id) = s.strip_prefix('#') {
        return is_ident(id).then(|| Selector::Id(id.to_string()));
    }

    let mut parts = s.split('.');
    let tag = parts.next().unwrap_or_default();
    let classes: Vec<String> = parts.map(str::to_string).collect();
    if !(tag.is_empty() || is_ident(tag)) || !classes.iter().all(|c| is_ident(c)) {
        // Combinators, attribute selectors, pseudo-classes: unsupported.
        return None;
    }

    match (tag.is_empty(), classes.len()) {
        (false, 0) => Some(Selector::Type(tag.to_ascii_lowercase())),
        (true, 1) => classes.into_iter().next().map(Selector::Class),
        (true, 0) => None,
        _ => Some(Selector::Compound {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            classes,
        }),
    }
}
