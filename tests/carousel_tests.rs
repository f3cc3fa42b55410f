use scraper::{Html, Selector};

use forage::carousel::{CAROUSEL_ID_ATTR, Carousel, CarouselController, Direction};
use forage::data_models::{Product, ResultPayload};
use forage::layout::render_results;
use forage::view::render_html;

fn product(title: &str, images: &[&str]) -> Product {
    Product {
        title: title.to_string(),
        price: "1.00".to_string(),
        url: format!("https://shop.test/{title}"),
        images: images.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// data-index of the active image inside carousel `id`.
fn active_index(html: &str, id: &str) -> Option<String> {
    let doc = Html::parse_fragment(html);
    let selector = format!("[{CAROUSEL_ID_ATTR}=\"{id}\"] > img.card-image.active");
    let selector = Selector::parse(&selector).unwrap();
    let active: Vec<_> = doc.select(&selector).collect();
    assert_eq!(active.len(), 1, "exactly one image should be active");
    active[0].value().attr("data-index").map(str::to_string)
}

#[test]
fn test_three_image_state_machine() {
    let mut carousel = Carousel::new(3).unwrap();
    assert_eq!(carousel.index(), 0);

    assert_eq!(carousel.step(Direction::Next), 1);
    carousel.step(Direction::Next);
    carousel.step(Direction::Next);
    assert_eq!(carousel.step(Direction::Next), 0);

    assert_eq!(carousel.step(Direction::Prev), 2);
}

#[test]
fn test_single_image_carousel_is_not_registered() {
    let mut nodes = render_results(&ResultPayload::new(vec![product("solo", &["a.jpg"])], vec![]));
    let controller = CarouselController::attach(&mut nodes);
    assert!(controller.is_empty());
    assert!(!render_html(&nodes).contains(CAROUSEL_ID_ATTR));
}

#[test]
fn test_attach_registers_each_multi_image_carousel() {
    let mut nodes = render_results(&ResultPayload::new(
        vec![
            product("a", &["1.jpg", "2.jpg"]),
            product("b", &["1.jpg"]),
            product("c", &["1.jpg", "2.jpg", "3.jpg"]),
            product("d", &[]),
        ],
        vec![],
    ));
    let controller = CarouselController::attach(&mut nodes);
    assert_eq!(controller.len(), 2);

    let ids: Vec<&str> = controller.ids().collect();
    assert_ne!(ids[0], ids[1]);
    assert_eq!(controller.get(ids[0]).unwrap().image_count(), 2);
    assert_eq!(controller.get(ids[1]).unwrap().image_count(), 3);
}

#[test]
fn test_navigation_moves_active_class() {
    let mut nodes = render_results(&ResultPayload::new(
        vec![product("pan", &["1.jpg", "2.jpg", "3.jpg"])],
        vec![],
    ));
    let mut controller = CarouselController::attach(&mut nodes);
    let id = controller.ids().next().unwrap().to_string();

    assert_eq!(active_index(&render_html(&nodes), &id).as_deref(), Some("0"));

    assert_eq!(controller.navigate(&mut nodes, &id, Direction::Next), Some(1));
    assert_eq!(active_index(&render_html(&nodes), &id).as_deref(), Some("1"));

    controller.navigate(&mut nodes, &id, Direction::Prev);
    assert_eq!(controller.navigate(&mut nodes, &id, Direction::Prev), Some(2));
    assert_eq!(active_index(&render_html(&nodes), &id).as_deref(), Some("2"));
}

#[test]
fn test_navigation_is_per_carousel() {
    let mut nodes = render_results(&ResultPayload::new(
        vec![product("a", &["1.jpg", "2.jpg"]), product("b", &["1.jpg", "2.jpg"])],
        vec![],
    ));
    let mut controller = CarouselController::attach(&mut nodes);
    let ids: Vec<String> = controller.ids().map(str::to_string).collect();

    controller.navigate(&mut nodes, &ids[0], Direction::Next);
    let html = render_html(&nodes);
    assert_eq!(active_index(&html, &ids[0]).as_deref(), Some("1"));
    assert_eq!(active_index(&html, &ids[1]).as_deref(), Some("0"));
}

#[test]
fn test_unknown_carousel_is_none() {
    let mut nodes = Vec::new();
    let mut controller = CarouselController::attach(&mut nodes);
    assert_eq!(controller.navigate(&mut nodes, "missing", Direction::Next), None);
}

#[test]
fn test_direction_parsing() {
    assert_eq!("next".parse::<Direction>(), Ok(Direction::Next));
    assert_eq!("Prev".parse::<Direction>(), Ok(Direction::Prev));
    assert!("up".parse::<Direction>().is_err());
}
