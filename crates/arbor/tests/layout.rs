//! Integration tests for the pack layout engine.

use arbor::layout::{
    Intrinsic, IntrinsicSize, LayoutTree, NodeId, Viewport, format_layout_tree, layout,
};
use arbor_style::Pack;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn pack(css: &str) -> Pack {
    Pack::parse(css).unwrap()
}

fn with_children(tree: &mut LayoutTree, parent: &str, children: &[&str]) -> (NodeId, Vec<NodeId>) {
    let root = tree.insert(pack(parent));
    let ids = children
        .iter()
        .map(|css| {
            let child = tree.insert(pack(css));
            tree.append_child(root, child);
            child
        })
        .collect();
    (root, ids)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn flex_child_takes_what_fixed_siblings_leave() {
    init_tracing();
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(&mut tree, "direction: row", &["width: 40", "flex: 1"]);

    layout(&mut tree, root, &Viewport::new(100.0, 50.0));

    let fixed = tree.layout_box(children[0]).unwrap();
    let grow = tree.layout_box(children[1]).unwrap();
    assert_eq!(fixed.content_width, 40.0);
    assert_eq!(fixed.content_left, 0.0);
    assert_eq!(grow.content_width, 60.0);
    assert_eq!(grow.content_left, 40.0);
    assert_eq!(grow.content_height, 50.0);

    let root_box = tree.layout_box(root).unwrap();
    assert_eq!(root_box.content_width, 100.0);
    assert_eq!(root_box.content_height, 50.0);
}

#[test]
fn flex_space_is_shared_in_proportion() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(&mut tree, "direction: row", &["flex: 1", "flex: 2"]);

    layout(&mut tree, root, &Viewport::new(300.0, 100.0));

    assert_eq!(tree.layout_box(children[0]).unwrap().content_width, 100.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_width, 200.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_left, 100.0);
}

#[test]
fn footprints_fill_the_main_axis_exactly() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: column",
        &["height: 50", "flex: 1; padding: 10", "flex: 2"],
    );

    layout(&mut tree, root, &Viewport::new(120.0, 300.0));

    let total: f32 = children
        .iter()
        .map(|&id| {
            let layout = tree.layout_box(id).unwrap();
            layout.padding.top + layout.content_height + layout.padding.bottom
        })
        .sum();
    assert_close(total, 300.0);

    let first_flex = tree.layout_box(children[1]).unwrap().content_height;
    let second_flex = tree.layout_box(children[2]).unwrap().content_height;
    assert_close(second_flex, 2.0 * first_flex);
}

#[test]
fn padding_offsets_content() {
    let mut tree = LayoutTree::new();
    let (root, children) =
        with_children(&mut tree, "direction: row; padding: 10", &["flex: 1; padding: 5"]);

    layout(&mut tree, root, &Viewport::new(200.0, 100.0));

    let root_box = tree.layout_box(root).unwrap();
    assert_eq!(root_box.content_width, 180.0);
    assert_eq!(root_box.content_height, 80.0);
    assert_eq!(root_box.absolute_content_left, 10.0);

    let child = tree.layout_box(children[0]).unwrap();
    assert_eq!(child.content_width, 170.0);
    assert_eq!(child.content_height, 70.0);
    assert_eq!(child.content_left, 5.0);
    assert_eq!(child.content_top, 5.0);
    assert_eq!(child.absolute_content_left, 15.0);
    assert_eq!(child.absolute_content_top, 15.0);
}

#[test]
fn right_to_left_rows_are_mirrored() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: row; text-direction: rtl",
        &["width: 30", "width: 20"],
    );

    layout(&mut tree, root, &Viewport::new(100.0, 20.0));

    assert_eq!(tree.layout_box(children[0]).unwrap().content_left, 70.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_left, 50.0);
}

#[test]
fn cross_axis_alignment() {
    let mut tree = LayoutTree::new();
    let (centered, centered_children) = with_children(
        &mut tree,
        "direction: row; alignment: center; height: 100",
        &["width: 50; height: 40"],
    );
    layout(&mut tree, centered, &Viewport::new(200.0, 300.0));
    assert_eq!(tree.layout_box(centered_children[0]).unwrap().content_top, 30.0);

    let (bottom, bottom_children) = with_children(
        &mut tree,
        "direction: row; alignment: bottom; height: 100",
        &["width: 50; height: 40"],
    );
    layout(&mut tree, bottom, &Viewport::new(200.0, 300.0));
    assert_eq!(tree.layout_box(bottom_children[0]).unwrap().content_top, 60.0);

    let (right, right_children) = with_children(
        &mut tree,
        "direction: column; alignment: right",
        &["width: 50; height: 20"],
    );
    layout(&mut tree, right, &Viewport::new(200.0, 100.0));
    assert_eq!(tree.layout_box(right_children[0]).unwrap().content_left, 150.0);
}

#[test]
fn hidden_children_take_no_space() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: row",
        &["display: none; width: 30", "flex: 1"],
    );
    let grandchild = tree.insert(pack("width: 10"));
    tree.append_child(children[0], grandchild);

    layout(&mut tree, root, &Viewport::new(100.0, 10.0));

    let hidden = tree.layout_box(children[0]).unwrap();
    assert_eq!(hidden.content_width, 0.0);
    assert_eq!(hidden.content_height, 0.0);
    assert_eq!(tree.layout_box(grandchild).unwrap().content_width, 0.0);

    let visible = tree.layout_box(children[1]).unwrap();
    assert_eq!(visible.content_width, 100.0);
    assert_eq!(visible.content_left, 0.0);
}

#[test]
fn style_lengths_scale_with_dpi() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(&mut tree, "direction: row", &["width: 50", "flex: 1"]);

    layout(&mut tree, root, &Viewport::new(400.0, 100.0).with_dpi(192.0));

    assert_eq!(tree.layout_box(children[0]).unwrap().content_width, 100.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_width, 300.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_left, 100.0);
}

#[test]
fn flexible_intrinsic_width_is_a_minimum() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(pack("direction: row"));
    let grow = tree.insert_with_intrinsic(
        pack("flex: 1"),
        IntrinsicSize::new(Intrinsic::AtLeast(80.0), Intrinsic::Unset),
    );
    let fixed = tree.insert(pack("width: 50"));
    tree.append_child(root, grow);
    tree.append_child(root, fixed);

    layout(&mut tree, root, &Viewport::new(100.0, 20.0));

    assert_eq!(tree.layout_box(grow).unwrap().content_width, 80.0);
    assert_eq!(tree.layout_box(fixed).unwrap().content_left, 80.0);
}

#[test]
fn fixed_intrinsic_size_ignores_flex() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(pack("direction: row; alignment: center"));
    let label = tree.insert_with_intrinsic(pack("flex: 1"), IntrinsicSize::fixed(30.0, 10.0));
    tree.append_child(root, label);

    layout(&mut tree, root, &Viewport::new(100.0, 50.0));

    let label_box = tree.layout_box(label).unwrap();
    assert_eq!(label_box.content_width, 30.0);
    assert_eq!(label_box.content_height, 10.0);
    assert_eq!(label_box.content_top, 20.0);
}

#[test]
fn explicit_zero_width_is_respected() {
    let mut tree = LayoutTree::new();
    let (root, children) =
        with_children(&mut tree, "direction: row", &["width: 0; flex: 1", "flex: 1"]);

    layout(&mut tree, root, &Viewport::new(100.0, 10.0));

    assert_eq!(tree.layout_box(children[0]).unwrap().content_width, 0.0);
    assert_eq!(tree.layout_box(children[1]).unwrap().content_width, 100.0);
}

#[test]
fn absolute_positions_accumulate_through_nesting() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: column; padding: 10",
        &["height: 20", "direction: row; height: 40"],
    );
    let first = tree.insert(pack("width: 30"));
    let second = tree.insert(pack("width: 40"));
    tree.append_child(children[1], first);
    tree.append_child(children[1], second);

    layout(&mut tree, root, &Viewport::new(200.0, 200.0));

    let row = tree.layout_box(children[1]).unwrap();
    assert_eq!(row.absolute_content_left, 10.0);
    assert_eq!(row.absolute_content_top, 30.0);
    assert_eq!(row.content_width, 70.0);

    let inner = tree.layout_box(second).unwrap();
    assert_eq!(inner.content_left, 30.0);
    assert_eq!(inner.absolute_content_left, 40.0);
    assert_eq!(inner.absolute_content_top, 30.0);
    assert_eq!(inner.content_height, 40.0);
}

#[test]
fn flex_container_fills_its_share_of_a_row() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: row",
        &["width: 40", "direction: row; flex: 1"],
    );
    let content = tree.insert(pack("width: 10"));
    tree.append_child(children[1], content);

    layout(&mut tree, root, &Viewport::new(100.0, 50.0));

    let container = tree.layout_box(children[1]).unwrap();
    assert_eq!(container.content_width, 60.0);
    assert_eq!(container.content_left, 40.0);
    assert_eq!(container.content_height, 50.0);
    assert_eq!(tree.layout_box(content).unwrap().absolute_content_left, 40.0);
}

#[test]
fn flex_container_fills_its_share_of_a_column() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: column",
        &["height: 40", "direction: column; flex: 1"],
    );
    let content = tree.insert(pack("height: 10"));
    tree.append_child(children[1], content);

    layout(&mut tree, root, &Viewport::new(50.0, 100.0));

    let container = tree.layout_box(children[1]).unwrap();
    assert_eq!(container.content_height, 60.0);
    assert_eq!(container.content_top, 40.0);
    assert_eq!(container.content_width, 50.0);
    assert_eq!(tree.layout_box(content).unwrap().content_height, 10.0);
}

#[test]
fn flex_children_of_a_flex_container_share_its_space() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(
        &mut tree,
        "direction: row",
        &["width: 40", "direction: row; flex: 1"],
    );
    let first = tree.insert(pack("flex: 1"));
    let second = tree.insert(pack("flex: 1"));
    tree.append_child(children[1], first);
    tree.append_child(children[1], second);

    layout(&mut tree, root, &Viewport::new(100.0, 20.0));

    assert_eq!(tree.layout_box(first).unwrap().content_width, 30.0);
    assert_eq!(tree.layout_box(second).unwrap().content_width, 30.0);
    assert_eq!(tree.layout_box(second).unwrap().absolute_content_left, 70.0);
}

#[test]
fn relayout_picks_up_style_changes() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(&mut tree, "direction: row", &["width: 40", "flex: 1"]);
    layout(&mut tree, root, &Viewport::new(100.0, 10.0));

    tree.style_mut(children[0]).unwrap().apply("width", "70").unwrap();
    layout(&mut tree, root, &Viewport::new(100.0, 10.0));

    assert_eq!(tree.layout_box(children[1]).unwrap().content_width, 30.0);
}

#[test]
fn formatted_tree_lists_every_node() {
    let mut tree = LayoutTree::new();
    let (root, children) = with_children(&mut tree, "direction: row", &["width: 40", "flex: 1"]);
    tree.set_label(root, "box");
    tree.set_label(children[0], "button");
    tree.set_label(children[1], "spacer");
    layout(&mut tree, root, &Viewport::new(100.0, 50.0));

    let dump = format_layout_tree(&tree, root);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("box [100x50 @ (0, 0)]"));
    assert!(lines[1].contains("button [40x50 @ (0, 0)] width: 40"));
    assert!(lines[2].contains("spacer [60x50 @ (40, 0)] flex: 1"));
}
