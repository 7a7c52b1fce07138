use super::*;

fn leaf(element: Option<ElementId>) -> RenderNode {
    RenderNode {
        element,
        interactive: true,
        corners: [Point::ZERO; 4],
        bounds: Rect::ZERO,
        content: NodeContent::Primitives(Vec::new()),
    }
}

fn group(element: Option<ElementId>, children: Vec<RenderNode>) -> RenderNode {
    RenderNode {
        content: NodeContent::Group(children),
        ..leaf(element)
    }
}

#[test]
fn find_descends_into_groups() {
    let deep = uuid::Uuid::new_v4();
    let node = group(None, vec![leaf(None), group(None, vec![leaf(Some(deep))])]);
    assert_eq!(node.find(deep).unwrap().element, Some(deep));
    assert!(node.find(uuid::Uuid::new_v4()).is_none());
    assert_eq!(node.depth(), 3);
}

#[test]
fn tree_lookup_only_searches_content() {
    let id = uuid::Uuid::new_v4();
    let tree = RenderTree {
        surface: Canvas::new(4, 4).unwrap(),
        layers: vec![
            Layer::Background(BackgroundFill {
                color: Color::WHITE,
                image: None,
            }),
            Layer::Content(ContentGroup {
                clip: None,
                children: vec![leaf(Some(id))],
            }),
            Layer::Handles(None),
        ],
    };
    assert!(tree.lookup(id).is_some());
    assert!(tree.handles().is_none());
    assert_eq!(
        tree.layer_kinds(),
        vec![LayerKind::Background, LayerKind::Content, LayerKind::Handles]
    );
}
