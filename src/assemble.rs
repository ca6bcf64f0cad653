//! Doc item assembly: merge each construct with the record parsed from its
//! block, keeping the class → method ownership of the descriptors.

use crate::associate::Association;
use crate::model::{CommentBlock, ConstructDescriptor, ConstructKind, DocItem, DocRecord};
use crate::style::Style;

/// Build the ordered item list for one module.
///
/// The module item comes first when any module documentation exists, then
/// classes and functions in declaration order.
pub fn assemble(
    module: &ConstructDescriptor,
    blocks: &[CommentBlock],
    assoc: &Association,
    style: Style,
) -> Vec<DocItem> {
    let mut items = Vec::with_capacity(module.children.len() + 1);

    if !assoc.module_blocks.is_empty() {
        let raw_doc = assoc
            .module_blocks
            .iter()
            .filter_map(|&idx| blocks.get(idx))
            .map(CommentBlock::text)
            .collect::<Vec<_>>()
            .join("\n\n");
        items.push(DocItem {
            kind: ConstructKind::Module,
            name: module.name.clone(),
            line: module.line,
            parent: None,
            params: Vec::new(),
            return_type: None,
            fields: Default::default(),
            doc: style.parse(&raw_doc),
            raw_doc,
            methods: Vec::new(),
        });
    }

    for construct in &module.children {
        items.push(item(construct, blocks, assoc, style));
    }

    items
}

fn item(
    construct: &ConstructDescriptor,
    blocks: &[CommentBlock],
    assoc: &Association,
    style: Style,
) -> DocItem {
    let raw_doc = assoc
        .block_for(construct)
        .and_then(|idx| blocks.get(idx))
        .map(CommentBlock::text)
        .unwrap_or_default();
    let doc = if raw_doc.is_empty() {
        DocRecord::default()
    } else {
        style.parse(&raw_doc)
    };

    DocItem {
        kind: construct.kind,
        name: construct.name.clone(),
        line: construct.line,
        parent: construct.parent.clone(),
        params: construct.params.clone(),
        return_type: construct.return_type.clone(),
        fields: construct.fields.clone(),
        raw_doc,
        doc,
        methods: construct
            .children
            .iter()
            .map(|method| item(method, blocks, assoc, style))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::associate::associate;
    use crate::extract::extract;
    use crate::walker::walk;

    fn run(source: &str, style: Style) -> Vec<DocItem> {
        let blocks = extract(source);
        let module = walk("sample", source).unwrap();
        let assoc = associate(source, &blocks, &module);
        assemble(&module, &blocks, &assoc, style)
    }

    #[test]
    fn module_item_comes_first() {
        let items = run(
            "#/ Module docs.\n\nimport os\n\n#/ Adds.\ndef add(a, b):\n    return a + b\n",
            Style::Google,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ConstructKind::Module);
        assert_eq!(items[0].name, "sample");
        assert_eq!(items[0].doc.description, "Module docs.");
        assert_eq!(items[1].name, "add");
        assert_eq!(items[1].doc.description, "Adds.");
    }

    #[test]
    fn no_module_item_without_module_docs() {
        let items = run("def f():\n    pass\n", Style::Google);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ConstructKind::Function);
        assert!(!items[0].is_documented());
        assert!(items[0].doc.is_empty());
    }

    #[test]
    fn module_blocks_concatenate_with_blank_line() {
        let items = run("#/ First.\n\n#/ Second.\n", Style::Google);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].raw_doc, "First.\n\nSecond.");
        assert_eq!(items[0].doc.description, "First.\n\nSecond.");
    }

    #[test]
    fn methods_nest_under_their_class() {
        let source = "#/ A box.\nclass Box:\n    size: int\n\n    #/ Grow.\n    #/\n    #/ Args:\n    #/     by: Amount.\n    def grow(self, by: int) -> None:\n        pass\n\n    def shrink(self):\n        pass\n";
        let items = run(source, Style::Google);
        assert_eq!(items.len(), 1);
        let class = &items[0];
        assert_eq!(class.kind, ConstructKind::Class);
        assert_eq!(class.doc.description, "A box.");
        assert_eq!(class.fields["size"], "int");
        assert_eq!(class.methods.len(), 2);

        let grow = &class.methods[0];
        assert_eq!(grow.kind, ConstructKind::Method);
        assert_eq!(grow.parent.as_deref(), Some("Box"));
        assert_eq!(grow.doc.params["by"], "Amount.");
        assert_eq!(grow.params.len(), 1);
        assert_eq!(grow.return_type.as_deref(), Some("None"));

        assert!(!class.methods[1].is_documented());
    }

    #[test]
    fn style_applies_to_every_block() {
        let source = "#/ :param a: first\ndef f(a):\n    pass\n\n#/ :returns: nothing\ndef g():\n    pass\n";
        let items = run(source, Style::Sphinx);
        assert_eq!(items[0].doc.params["a"], "first");
        assert_eq!(items[1].doc.returns, "nothing");
    }
}
