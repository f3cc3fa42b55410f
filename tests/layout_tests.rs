use scraper::{Html, Selector};

use forage::cards::{product_card, recipe_card};
use forage::data_models::{Product, Recipe, ResultPayload};
use forage::layout::{Layout, Section, render_results, select_layout};
use forage::view::render_html;

mod test_helpers {
    use super::*;

    pub fn product(title: &str, images: &[&str]) -> Product {
        Product {
            title: title.to_string(),
            description: format!("{title} description"),
            price: "4.99".to_string(),
            url: format!("https://shop.test/{title}"),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn recipe(title: &str, image: Option<&str>) -> Recipe {
        Recipe {
            title: title.to_string(),
            description: format!("How to make {title}"),
            url: format!("https://cook.test/{title}"),
            image_url: image.map(str::to_string),
        }
    }

    pub fn rendered(payload: &ResultPayload) -> Html {
        Html::parse_fragment(&render_html(&render_results(payload)))
    }

    pub fn count(doc: &Html, selector: &str) -> usize {
        doc.select(&Selector::parse(selector).unwrap()).count()
    }

    pub fn texts(doc: &Html, selector: &str) -> Vec<String> {
        doc.select(&Selector::parse(selector).unwrap())
            .map(|el| el.text().collect::<String>())
            .collect()
    }
}

use test_helpers::*;

#[cfg(test)]
mod layout_selection {
    use super::*;

    #[test]
    fn test_empty_payload_is_empty_layout() {
        assert_eq!(select_layout(&ResultPayload::default()), Layout::Empty);
    }

    #[test]
    fn test_products_only_is_single_section() {
        let payload = ResultPayload::new(vec![product("a", &[])], vec![]);
        assert!(matches!(
            select_layout(&payload),
            Layout::Single(Section::Products(items)) if items.len() == 1
        ));
    }

    #[test]
    fn test_recipes_only_is_single_section() {
        let payload = ResultPayload::new(vec![], vec![recipe("r", None)]);
        assert!(matches!(
            select_layout(&payload),
            Layout::Single(Section::Recipes(_))
        ));
    }

    #[test]
    fn test_both_is_dual() {
        let payload = ResultPayload::new(vec![product("a", &[])], vec![recipe("r", None)]);
        assert!(matches!(select_layout(&payload), Layout::Dual { .. }));
    }
}

#[cfg(test)]
mod rendering {
    use super::*;

    #[test]
    fn test_empty_renders_only_notice() {
        let doc = rendered(&ResultPayload::default());
        assert_eq!(texts(&doc, "p"), vec!["No results found."]);
        assert_eq!(count(&doc, ".section"), 0);
        assert_eq!(count(&doc, ".card"), 0);
    }

    #[test]
    fn test_single_products_section_is_full_width() {
        let doc = rendered(&ResultPayload::new(vec![product("a", &[])], vec![]));
        assert_eq!(count(&doc, ".section"), 1);
        assert_eq!(count(&doc, ".section.full-width"), 1);
        assert_eq!(texts(&doc, ".section > h2"), vec!["Products"]);
        assert_eq!(count(&doc, ".section > .card"), 1);
    }

    #[test]
    fn test_single_recipes_section_is_full_width() {
        let doc = rendered(&ResultPayload::new(
            vec![],
            vec![recipe("r1", None), recipe("r2", None)],
        ));
        assert_eq!(texts(&doc, ".section.full-width > h2"), vec!["Recipes"]);
        assert_eq!(count(&doc, ".card"), 2);
    }

    #[test]
    fn test_dual_sections_products_first() {
        let doc = rendered(&ResultPayload::new(
            vec![product("p1", &[])],
            vec![recipe("r1", None)],
        ));
        assert_eq!(texts(&doc, ".section > h2"), vec!["Products", "Recipes"]);
        assert_eq!(count(&doc, ".full-width"), 0);
        assert_eq!(count(&doc, ".section > .card"), 2);
    }

    #[test]
    fn test_card_order_follows_payload() {
        let doc = rendered(&ResultPayload::new(
            vec![product("first", &[]), product("second", &[]), product("third", &[])],
            vec![],
        ));
        assert_eq!(texts(&doc, ".card > h3"), vec!["first", "second", "third"]);
    }
}

#[cfg(test)]
mod cards {
    use super::*;

    fn card_doc(html: String) -> Html {
        Html::parse_fragment(&html)
    }

    #[test]
    fn test_product_card_contents() {
        let doc = card_doc(product_card(&product("kettle", &["k.jpg"])).to_html());
        assert_eq!(texts(&doc, ".card > h3"), vec!["kettle"]);
        assert_eq!(texts(&doc, ".card > p.price"), vec!["$4.99"]);
        assert_eq!(texts(&doc, ".card > a"), vec!["View Product"]);

        let link = doc.select(&Selector::parse("a").unwrap()).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("https://shop.test/kettle"));
        assert_eq!(link.value().attr("target"), Some("_blank"));
        assert_eq!(link.value().attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_recipe_card_contents() {
        let doc = card_doc(recipe_card(&recipe("stew", Some("stew.jpg"))).to_html());
        assert_eq!(texts(&doc, ".card > a"), vec!["View Recipe"]);
        assert_eq!(count(&doc, ".price"), 0);
        assert_eq!(count(&doc, ".image-carousel > img.card-image.active"), 1);
    }

    #[test]
    fn test_no_images_means_no_carousel() {
        let doc = card_doc(product_card(&product("plain", &[])).to_html());
        assert_eq!(count(&doc, ".image-carousel"), 0);

        let doc = card_doc(recipe_card(&recipe("plain", None)).to_html());
        assert_eq!(count(&doc, ".image-carousel"), 0);
    }

    #[test]
    fn test_blank_image_entries_are_skipped() {
        let doc = card_doc(product_card(&product("p", &["", "  "])).to_html());
        assert_eq!(count(&doc, ".image-carousel"), 0);
    }

    #[test]
    fn test_carousel_images_and_controls() {
        let doc = card_doc(product_card(&product("pan", &["1.jpg", "2.jpg", "3.jpg"])).to_html());
        let imgs: Vec<_> = doc
            .select(&Selector::parse("img.card-image").unwrap())
            .collect();
        assert_eq!(imgs.len(), 3);
        assert_eq!(imgs[0].value().attr("alt"), Some("pan - Image 1"));
        assert_eq!(imgs[2].value().attr("data-index"), Some("2"));
        assert_eq!(count(&doc, "img.card-image.active"), 1);
        assert_eq!(texts(&doc, "button.carousel-btn.prev"), vec!["<"]);
        assert_eq!(texts(&doc, "button.carousel-btn.next"), vec![">"]);
    }

    #[test]
    fn test_single_image_has_no_controls() {
        let doc = card_doc(product_card(&product("cup", &["only.jpg"])).to_html());
        assert_eq!(count(&doc, "img.card-image"), 1);
        assert_eq!(count(&doc, ".carousel-btn"), 0);
    }

    #[test]
    fn test_fields_are_escaped() {
        let mut p = product("x", &[]);
        p.title = "<script>alert(1)</script>".to_string();
        p.description = "Salt & <b>pepper</b>".to_string();
        let html = product_card(&p).to_html();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        let doc = card_doc(html);
        assert_eq!(texts(&doc, "h3"), vec!["<script>alert(1)</script>"]);
        assert_eq!(count(&doc, "script"), 0);
    }

    #[test]
    fn test_unsafe_urls_are_neutralised() {
        let mut p = product("x", &["javascript:alert(1)", "ok.jpg"]);
        p.url = "javascript:alert(document.cookie)".to_string();
        let doc = card_doc(product_card(&p).to_html());

        let link = doc.select(&Selector::parse("a").unwrap()).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("#"));
        let srcs: Vec<_> = doc
            .select(&Selector::parse("img").unwrap())
            .filter_map(|img| img.value().attr("src"))
            .collect();
        assert_eq!(srcs, vec!["#", "ok.jpg"]);
    }
}
