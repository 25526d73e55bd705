//! Source rendering for synthesis results.

use std::fmt::Write as _;

use facade_types::{
    AccessorSet, AmendedTypeDeclaration, GeneratedFile, InterfaceDeclaration, InterfaceMember,
    RenderedParameter, SetAccessor, SynthesisResult,
};

pub const HEADER: &str = "// <auto-generated/>";

/// Line-oriented writer with tab indentation and `\n` endings.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push('\t');
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `{`, indents, and returns to the previous depth on `close`.
    pub fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Documentation lines, copied as-is apart from their leading
    /// whitespace, which is replaced by the current indentation.
    pub fn doc(&mut self, documentation: Option<&str>) {
        if let Some(documentation) = documentation {
            for line in documentation.lines() {
                self.line(line.trim_start());
            }
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

fn generics(type_parameters: &[String]) -> String {
    if type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", type_parameters.join(", "))
    }
}

fn parameter_list(parameters: &[RenderedParameter]) -> String {
    parameters
        .iter()
        .map(|p| match &p.default {
            Some(default) => format!("{} {} = {}", p.ty, p.name, default),
            None => format!("{} {}", p.ty, p.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn accessor_block(accessors: &AccessorSet) -> String {
    let mut block = String::from("{");
    if accessors.get {
        block.push_str(" get;");
    }
    match accessors.set {
        Some(SetAccessor::Set) => block.push_str(" set;"),
        Some(SetAccessor::Init) => block.push_str(" init;"),
        None => {}
    }
    block.push_str(" }");
    block
}

/// Declaration text of one interface member, without documentation.
pub fn member_declaration(member: &InterfaceMember) -> String {
    match member {
        InterfaceMember::Method(m) => format!(
            "{} {}{}({});",
            m.return_type,
            m.name,
            generics(&m.type_parameters),
            parameter_list(&m.parameters)
        ),
        InterfaceMember::Property(p) => {
            format!("{} {} {}", p.ty, p.name, accessor_block(&p.accessors))
        }
        InterfaceMember::Indexer(i) => format!(
            "{} this[{}] {}",
            i.ty,
            parameter_list(&i.parameters),
            accessor_block(&i.accessors)
        ),
        InterfaceMember::Event(e) => format!("event {} {};", e.handler_type, e.name),
    }
}

fn write_interface(w: &mut SourceWriter, interface: &InterfaceDeclaration) {
    w.line(&format!(
        "{} interface {}{}",
        interface.accessibility,
        interface.name,
        generics(&interface.type_parameters)
    ));
    w.open();
    for (i, member) in interface.members.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        w.doc(member.documentation());
        w.line(&member_declaration(member));
    }
    w.close();
}

fn write_amended_type(w: &mut SourceWriter, amended: &AmendedTypeDeclaration) {
    let mut head = String::new();
    let _ = write!(head, "{} ", amended.accessibility);
    if amended.is_partial {
        head.push_str("partial ");
    }
    let _ = write!(
        head,
        "{} {}{} : {}",
        amended.kind.keyword(),
        amended.name,
        generics(&amended.type_parameters),
        amended.conforms_to
    );

    if amended.kind.is_record() {
        head.push(';');
        w.line(&head);
    } else {
        w.line(&head);
        w.open();
        w.close();
    }
}

/// Full source text for one result.
pub fn render(result: &SynthesisResult) -> String {
    let mut w = SourceWriter::new();
    w.line(HEADER);
    w.line("#nullable enable");
    w.blank();

    let namespaced = !result.namespace_path.is_empty();
    if namespaced {
        w.line(&format!("namespace {}", result.namespace_path.join(".")));
        w.open();
    }

    write_interface(&mut w, &result.interface);
    w.blank();
    write_amended_type(&mut w, &result.amended_type);

    if namespaced {
        w.close();
    }
    w.finish()
}

/// Output file name for one result, e.g. `Shop_IRepo_1__.g.cs`.
pub fn hint_name(result: &SynthesisResult) -> String {
    let mut name = format!(
        "{}_{}",
        result.namespace_path.join("."),
        result.interface.name
    );
    let arity = result.interface.type_parameters.len();
    if arity > 0 {
        let _ = write!(name, "_{}", arity);
    }
    name.push_str("__.g.cs");
    name
}

pub fn render_file(result: &SynthesisResult) -> GeneratedFile {
    GeneratedFile {
        hint_name: hint_name(result),
        source: render(result),
    }
}
