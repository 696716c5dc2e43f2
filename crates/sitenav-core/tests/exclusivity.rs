use std::collections::BTreeSet;

use proptest::prelude::*;
use sitenav_core::{
    Catalog, MutationTarget, NavControl, PageId, RouterSettings, SearchSettings, SiteController,
    SiteLayout, ViewMutation,
};

const SECTIONS: [&str; 4] = ["home", "aboutus", "courses", "results"];

fn controller() -> SiteController {
    SiteController::new(
        SiteLayout {
            sections: SECTIONS.into_iter().map(PageId::from).collect(),
            controls: vec![
                NavControl::from_markup(Some("showPage('home')"), None, "Home"),
                NavControl::from_markup(None, None, "About Us"),
                NavControl::from_markup(None, Some("courses"), "Courses"),
            ],
            has_search_input: true,
        },
        RouterSettings::default(),
        SearchSettings::default(),
        Catalog::default(),
    )
}

/// Applies visibility mutations to a model of the section set.
fn apply(
    visible: &mut BTreeSet<PageId>,
    active: &mut BTreeSet<usize>,
    mutations: &[ViewMutation],
) {
    for mutation in mutations {
        match mutation {
            ViewMutation::SetVisible {
                target: MutationTarget::Section(id),
                visible: true,
            } => {
                visible.insert(id.clone());
            }
            ViewMutation::SetVisible {
                target: MutationTarget::Section(id),
                visible: false,
            } => {
                visible.remove(id);
            }
            ViewMutation::SetActive {
                control,
                active: true,
            } => {
                active.insert(*control);
            }
            ViewMutation::SetActive {
                control,
                active: false,
            } => {
                active.remove(control);
            }
            _ => {}
        }
    }
}

fn page_id() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(SECTIONS.to_vec()).prop_map(str::to_string),
        "[a-z]{1,8}",
    ]
}

#[test]
fn startup_shows_only_home() {
    let mut controller = controller();
    let mut visible = BTreeSet::new();
    let mut active = BTreeSet::new();
    // Everything starts displayed, as in a document without inline styles.
    visible.extend(SECTIONS.into_iter().map(PageId::from));

    apply(&mut visible, &mut active, &controller.start().mutations);
    assert_eq!(visible, BTreeSet::from([PageId::from("home")]));
    assert_eq!(active, BTreeSet::from([0]));
}

proptest! {
    #[test]
    fn at_most_one_section_and_control_after_each_navigation(
        pages in proptest::collection::vec(page_id(), 1..20)
    ) {
        let mut controller = controller();
        let mut visible: BTreeSet<PageId> = SECTIONS.into_iter().map(PageId::from).collect();
        let mut active = BTreeSet::new();
        apply(&mut visible, &mut active, &controller.start().mutations);

        for page in pages {
            let transition = controller.navigate_to(&page);
            apply(&mut visible, &mut active, &transition.mutations);
            prop_assert!(visible.len() <= 1);
            prop_assert!(active.len() <= 1);
            prop_assert_eq!(visible.iter().next(), controller.router().current());
            prop_assert_eq!(
                active.iter().next().copied(),
                controller.router().state().active_control
            );
        }
    }
}
