//! Mounting descriptions into a live container.

use pentimento_tela::{NodeId, TreeSink};

use super::anchor::Anchor;
use super::node::{resolve, Node, VNode};

/// Clear `container` and materialize `node` into it.
///
/// The container's entire current content is treated as one insertion point,
/// so whatever was there is removed in the same splice that attaches the new
/// subtree. Returns the root snapshot; keep it (or a [`ComponentHandle`]
/// retained from the description) to drive later reconcile passes.
///
/// [`ComponentHandle`]: super::component::ComponentHandle
pub fn mount(tree: &mut impl TreeSink, node: &Node, container: NodeId) -> VNode {
    let anchor = Anchor::covering(tree, container);
    let mut snapshot = resolve(node);
    snapshot.materialize(tree, anchor);
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdom::builder::h;
    use crate::vdom::props::Props;
    use pentimento_tela::MemoryTree;

    #[test]
    fn mount_clears_existing_content() {
        let mut tree = MemoryTree::new();
        let body = tree.create_element("body");
        let stale = tree.create_text("stale");
        tree.splice(body, 0, 0, &[stale]);

        let node = h("div", Props::new(), vec!["fresh".into()]).unwrap();
        let snapshot = mount(&mut tree, &node, body);

        assert_eq!(tree.to_string_tree(body), "<body><div>fresh</div></body>");
        assert!(!tree.contains(stale));
        assert_eq!(snapshot.anchor().unwrap().parent(), body);
    }

    #[test]
    fn mount_builds_the_whole_description() {
        let mut tree = MemoryTree::new();
        let body = tree.create_element("body");

        let node = h(
            "div",
            Props::new(),
            vec![
                "hello".into(),
                h("span", Props::new(), vec!["world".into()])
                    .unwrap()
                    .into(),
            ],
        )
        .unwrap();
        mount(&mut tree, &node, body);

        assert_eq!(
            tree.to_string_tree(body),
            "<body><div>hello<span>world</span></div></body>"
        );
    }
}
