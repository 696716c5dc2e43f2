use std::path::PathBuf;

use anyhow::Result;
use sitenav::{
    Catalog, Geometry, NavigationOutcome, NodeId, PageDocument, PageEntry, PageId, Rect,
    ScrollOffset, Selector, SiteConfig, SitePage,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/index.html")
}

fn mount() -> Result<SitePage> {
    SitePage::from_file(&fixture_path(), &SiteConfig::default())
}

fn input_box() -> Geometry {
    Geometry {
        anchor: Rect::new(400.0, 20.0, 240.0, 36.0),
        scroll: ScrollOffset::default(),
    }
}

fn pages(ids: &[&str]) -> Vec<PageId> {
    ids.iter().map(|id| PageId::from(*id)).collect()
}

fn active_controls(page: &SitePage) -> Vec<usize> {
    page.nav_controls()
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            page.document()
                .element(**node)
                .is_some_and(|e| e.has_class("active"))
        })
        .map(|(index, _)| index)
        .collect()
}

fn input_value(page: &SitePage) -> String {
    page.search_input()
        .and_then(|node| page.document().element(node))
        .map(|e| e.value().to_string())
        .unwrap_or_default()
}

fn result_rows(page: &SitePage) -> Vec<NodeId> {
    let selector = Selector::parse(".sr-row").expect("selector");
    page.document()
        .select(&selector)
        .into_iter()
        .filter(|row| page.document().contains(page.results_container(), *row))
        .collect()
}

#[test]
fn startup_shows_only_home() -> Result<()> {
    let page = mount()?;
    assert_eq!(page.visible_sections(), pages(&["home"]));
    assert_eq!(page.current_page(), Some(&PageId::from("home")));
    // The stale marker from the markup is replaced by the home control's.
    assert_eq!(active_controls(&page), vec![0]);
    assert!(!page.dropdown_visible());
    Ok(())
}

#[test]
fn results_container_is_created_and_hidden() -> Result<()> {
    let page = mount()?;
    let results = page.results_container();
    let element = page.document().element(results).expect("results element");
    assert_eq!(element.id(), Some("searchResults"));
    assert!(!element.is_displayed());
    assert_eq!(element.style("z-index"), Some("9999"));
    assert!(page.document().contains(page.document().body(), results));
    Ok(())
}

#[test]
fn nav_clicks_use_every_association_form() -> Result<()> {
    let mut page = mount()?;
    let expectations = [
        (1, "aboutus"),
        (2, "institutions"),
        (3, "courses"),
        (6, "contactus"),
        (0, "home"),
    ];
    for (control, expected) in expectations {
        let node = page.nav_controls()[control];
        let transition = page.click(node);
        assert!(transition.default_prevented);
        assert_eq!(page.visible_sections(), pages(&[expected]));
        assert_eq!(active_controls(&page), vec![control]);
    }
    Ok(())
}

#[test]
fn click_on_nested_label_text_hits_its_control() -> Result<()> {
    let mut page = mount()?;
    let control = page.nav_controls()[2];
    let span = page
        .document()
        .node(control)
        .and_then(|node| node.first_child())
        .map(|child| child.id())
        .expect("span inside control");
    page.click(span);
    assert_eq!(page.current_page(), Some(&PageId::from("institutions")));
    Ok(())
}

#[test]
fn unknown_page_shows_nothing() -> Result<()> {
    let mut page = mount()?;
    let transition = page.navigate_to("doesNotExist");
    assert_eq!(
        transition.navigation,
        Some(NavigationOutcome::Missing("doesNotExist".into()))
    );
    assert!(page.visible_sections().is_empty());
    assert!(active_controls(&page).is_empty());
    assert_eq!(page.current_page(), None);
    Ok(())
}

#[test]
fn typing_filters_and_enter_selects_first() -> Result<()> {
    let mut page = mount()?;
    page.type_text("institutions", input_box());
    assert!(page.dropdown_visible());
    let rows = result_rows(&page);
    assert_eq!(rows.len(), 4);
    assert_eq!(
        page.document().text_content(rows[0]),
        "PCP Sikar (Institutions)"
    );
    let results = page
        .document()
        .element(page.results_container())
        .expect("results");
    assert!(results.is_displayed());
    assert_eq!(results.style("position"), Some("absolute"));
    assert_eq!(results.style("left"), Some("400px"));
    assert_eq!(results.style("top"), Some("62px"));
    assert_eq!(results.style("width"), Some("240px"));

    let transition = page.press_key("Enter");
    assert!(transition.default_prevented);
    assert_eq!(page.visible_sections(), pages(&["institutions"]));
    assert_eq!(input_value(&page), "");
    assert!(!page.dropdown_visible());
    Ok(())
}

#[test]
fn first_keystroke_anchors_panel_under_current_input() -> Result<()> {
    let mut page = mount()?;
    let geometry = Geometry {
        anchor: Rect::new(120.0, 300.0, 180.0, 30.0),
        scroll: ScrollOffset { x: 0.0, y: 40.0 },
    };
    page.type_text("neet", geometry);
    let results = page
        .document()
        .element(page.results_container())
        .expect("results");
    assert_eq!(results.style("left"), Some("120px"));
    assert_eq!(results.style("top"), Some("376px"));
    assert_eq!(results.style("width"), Some("180px"));

    // The input moved between keystrokes with no resize or scroll reported.
    let moved = Geometry {
        anchor: Rect::new(20.0, 10.0, 300.0, 30.0),
        scroll: ScrollOffset::default(),
    };
    page.type_text("nee", moved);
    let results = page
        .document()
        .element(page.results_container())
        .expect("results");
    assert_eq!(results.style("left"), Some("20px"));
    assert_eq!(results.style("top"), Some("46px"));
    assert_eq!(results.style("width"), Some("300px"));
    Ok(())
}

#[test]
fn repeated_typing_keeps_document_bounded() -> Result<()> {
    let mut page = mount()?;
    page.type_text("institutions", input_box());
    page.type_text("course", input_box());
    let settled = page.document().arena_len();
    for _ in 0..500 {
        page.type_text("institutions", input_box());
        page.type_text("course", input_box());
    }
    assert_eq!(page.document().arena_len(), settled);
    assert_eq!(result_rows(&page).len(), 3);
    Ok(())
}

#[test]
fn no_results_renders_inert_placeholder() -> Result<()> {
    let mut page = mount()?;
    page.type_text("xyznomatch", input_box());
    assert!(page.dropdown_visible());
    assert!(result_rows(&page).is_empty());
    let results = page.results_container();
    assert_eq!(page.document().text_content(results), "No results found");

    let placeholder = page
        .document()
        .select(&Selector::parse(".sr-no")?)
        .into_iter()
        .next()
        .expect("placeholder row");
    let transition = page.click(placeholder);
    assert_eq!(transition.navigation, None);
    assert!(page.dropdown_visible());
    Ok(())
}

#[test]
fn clicking_a_row_navigates_and_clears() -> Result<()> {
    let mut page = mount()?;
    page.type_text("medical", input_box());
    let rows = result_rows(&page);
    assert_eq!(rows.len(), 2);
    page.click(rows[1]);
    assert_eq!(page.current_page(), Some(&PageId::from("facilities")));
    assert_eq!(input_value(&page), "");
    assert!(!page.dropdown_visible());
    Ok(())
}

#[test]
fn outside_click_hides_without_navigating() -> Result<()> {
    let mut page = mount()?;
    page.type_text("nda", input_box());
    assert!(page.dropdown_visible());

    let input = page.search_input().expect("input");
    page.click(input);
    assert!(page.dropdown_visible());

    let footer = page.document().element_by_id("footer-text").expect("footer");
    let transition = page.click(footer);
    assert!(!page.dropdown_visible());
    assert_eq!(transition.navigation, None);
    assert_eq!(page.current_page(), Some(&PageId::from("home")));
    assert_eq!(input_value(&page), "nda");
    Ok(())
}

#[test]
fn scrolling_repositions_only_while_visible() -> Result<()> {
    let mut page = mount()?;
    let anchor = Rect::new(10.0, 10.0, 100.0, 20.0);
    page.type_text(
        "home",
        Geometry {
            anchor,
            scroll: ScrollOffset::default(),
        },
    );
    let moved = page.scroll(Geometry {
        anchor,
        scroll: ScrollOffset { x: 0.0, y: 50.0 },
    });
    assert_eq!(moved.mutations.len(), 1);
    let results = page
        .document()
        .element(page.results_container())
        .expect("results");
    assert_eq!(results.style("top"), Some("86px"));

    page.type_text("", input_box());
    assert!(!page.dropdown_visible());
    let idle = page.scroll(Geometry {
        anchor,
        scroll: ScrollOffset { x: 0.0, y: 90.0 },
    });
    assert!(idle.mutations.is_empty());
    Ok(())
}

#[test]
fn catalog_titles_are_escaped_in_the_document() -> Result<()> {
    let config = SiteConfig {
        catalog: Catalog::new(vec![PageEntry::new(
            "<script>alert('x')</script>Updates",
            &["news"],
            "home",
        )]),
        ..SiteConfig::default()
    };
    let mut page = SitePage::from_file(&fixture_path(), &config)?;
    page.type_text("news", input_box());
    let rows = result_rows(&page);
    assert_eq!(rows.len(), 1);
    assert!(page.document().select(&Selector::parse("script")?).is_empty());
    assert_eq!(
        page.document().text_content(rows[0]),
        "<script>alert('x')</script>Updates"
    );
    Ok(())
}

#[test]
fn missing_search_input_keeps_navigation_working() -> Result<()> {
    let document = PageDocument::parse(
        r##"<body>
            <div class="panel-option"><a href="#">Home</a></div>
            <div class="panel-option"><a href="#">Results</a></div>
            <section id="home" class="page-section">Home</section>
            <section id="results" class="page-section">Results</section>
            <div id="searchResults"></div>
        </body>"##,
    );
    let existing = document.element_by_id("searchResults").expect("results markup");
    let mut page = SitePage::mount(document, &SiteConfig::default())?;
    assert_eq!(page.results_container(), existing);
    let containers = page.document().select(&Selector::parse("#searchResults")?);
    assert_eq!(containers, vec![existing]);
    assert!(page.search_input().is_none());
    assert!(page.controller().search().is_none());
    assert!(page.type_text("home", input_box()).mutations.is_empty());
    assert!(page.press_key("Enter").mutations.is_empty());

    let results_control = page.nav_controls()[1];
    page.click(results_control);
    assert_eq!(page.visible_sections(), pages(&["results"]));
    Ok(())
}

#[test]
fn invalid_selector_is_reported_at_mount() {
    let mut config = SiteConfig::default();
    config.dom.nav_selector = "nav > a".to_string();
    let err = SitePage::mount(PageDocument::parse("<body></body>"), &config)
        .expect_err("unsupported selector");
    assert!(err.to_string().contains("navigation"));
}
