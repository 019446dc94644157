//! Breadcrumb of the current path.
//!
//! Every ancestor is clickable; the current folder is shown as plain text.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::RemotePath;

stylance::import_crate_style!(css, "src/components/browser/dashboard.module.css");

#[derive(Clone, PartialEq)]
struct Crumb {
    label: String,
    /// Jump target; `None` for the current folder.
    target: Option<RemotePath>,
}

fn crumbs(path: &RemotePath) -> Vec<Crumb> {
    let depth = path.depth();
    let mut crumbs = vec![Crumb {
        label: "Home".to_string(),
        target: (depth > 0).then(RemotePath::root),
    }];
    crumbs.extend(path.segments().iter().enumerate().map(|(i, segment)| Crumb {
        label: segment.clone(),
        target: (i + 1 < depth).then(|| path.prefix(i + 1)),
    }));
    crumbs
}

#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let crumbs = Memo::new(move |_| ctx.browser.with(|b| crumbs(b.current_path())));

    view! {
        <nav class=css::pathbar aria-label="Current folder">
            {move || {
                crumbs
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(i, crumb)| {
                        let icon = if i == 0 { ic::HOME } else { ic::FOLDER };
                        view! {
                            {(i > 0).then(|| view! {
                                <span class=css::separator aria-hidden="true">
                                    <Icon icon=ic::CHEVRON_RIGHT />
                                </span>
                            })}
                            <Segment icon=icon label=crumb.label target=crumb.target />
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[component]
fn Segment(icon: icondata::Icon, label: String, target: Option<RemotePath>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    match target {
        Some(path) => {
            let on_click = move |_: leptos::ev::MouseEvent| {
                let path = path.clone();
                ctx.run(move |s| async move { s.jump_to(path).await });
            };
            view! {
                <button class=css::segment on:click=on_click>
                    <span class=css::segmentIcon><Icon icon=icon /></span>
                    <span>{label}</span>
                </button>
            }
            .into_any()
        }
        None => view! {
            <span class=css::segmentCurrent aria-current="location">
                <span class=css::segmentIcon><Icon icon=icon /></span>
                <span>{label}</span>
            </span>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_single_current_crumb() {
        let crumbs = crumbs(&RemotePath::root());
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].target, None);
    }

    #[test]
    fn test_ancestors_are_targets() {
        let crumbs = crumbs(&RemotePath::from_segments(["A", "B", "C"]));
        let targets: Vec<_> = crumbs
            .iter()
            .map(|c| c.target.as_ref().map(RemotePath::display))
            .collect();
        assert_eq!(
            targets,
            vec![
                Some(String::new()),
                Some("A".to_string()),
                Some("A/B".to_string()),
                None
            ]
        );
        assert_eq!(crumbs[3].label, "C");
    }
}
