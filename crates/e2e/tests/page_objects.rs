//! Sidebar navigation and form page objects against the in-memory app

mod support;

use ngx_e2e::pages::AppPage;
use ngx_e2e::{E2eError, PageManager};

use support::{ymd, FakeApp};

fn app() -> FakeApp {
    FakeApp::new(ymd(2026, 10, 19))
}

#[tokio::test(start_paused = true)]
async fn expands_collapsed_group_once() {
    let app = app();
    let pm = PageManager::new(&app);

    pm.navigate_to().form_layouts_page().await.unwrap();
    pm.navigate_to().datepicker_page().await.unwrap();

    let state = app.state();
    assert_eq!(state.group_clicks, vec!["Forms".to_string()]);
    assert!(state.expanded["Forms"]);
    assert_eq!(state.page.as_deref(), Some("Datepicker"));
}

#[tokio::test(start_paused = true)]
async fn each_group_is_opened_on_demand() {
    let app = app();
    let nav = PageManager::new(&app).navigate_to();

    nav.smart_table_page().await.unwrap();
    nav.toastr_page().await.unwrap();
    nav.tooltip_page().await.unwrap();

    let state = app.state();
    assert_eq!(
        state.group_clicks,
        vec!["Tables & Data".to_string(), "Modal & Overlays".to_string()]
    );
    assert_eq!(state.page.as_deref(), Some("Tooltip"));
    assert!(!state.expanded["Forms"]);
}

#[tokio::test(start_paused = true)]
async fn open_routes_every_page() {
    let app = app();
    let nav = PageManager::new(&app).navigate_to();

    for page in [
        AppPage::FormLayouts,
        AppPage::Datepicker,
        AppPage::SmartTable,
        AppPage::Toastr,
        AppPage::Tooltip,
    ] {
        nav.open(page).await.unwrap();
        assert_eq!(app.state().page.as_deref(), Some(page.title()));
    }
}

#[tokio::test(start_paused = true)]
async fn grid_form_submits_credentials_and_option() {
    let app = app();
    let pm = PageManager::new(&app);
    pm.navigate_to().form_layouts_page().await.unwrap();

    pm.on_form_layouts_page()
        .submit_using_the_grid_form_with_credentials_and_select_option(
            "test@test.com",
            "Welcome1",
            "Option 2",
        )
        .await
        .unwrap();

    let state = app.state();
    assert_eq!(state.submissions.len(), 1);
    let submission = &state.submissions[0];
    assert_eq!(submission.form, "grid");
    assert_eq!(
        submission.fields,
        vec![
            ("email".to_string(), "test@test.com".to_string()),
            ("password".to_string(), "Welcome1".to_string()),
            ("option".to_string(), "Option 2".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn grid_form_refills_previous_values() {
    let app = app();
    let pm = PageManager::new(&app);
    pm.navigate_to().form_layouts_page().await.unwrap();
    let forms = pm.on_form_layouts_page();

    forms
        .submit_using_the_grid_form_with_credentials_and_select_option("a@b.c", "one", "Option 1")
        .await
        .unwrap();
    forms
        .submit_using_the_grid_form_with_credentials_and_select_option("x@y.z", "two", "Option 1")
        .await
        .unwrap();

    let state = app.state();
    assert_eq!(state.submissions[1].fields[0].1, "x@y.z");
    assert_eq!(state.submissions[1].fields[1].1, "two");
}

#[tokio::test(start_paused = true)]
async fn disabled_radio_is_not_actionable() {
    let app = app();
    let pm = PageManager::new(&app);
    pm.navigate_to().form_layouts_page().await.unwrap();

    let err = pm
        .on_form_layouts_page()
        .submit_using_the_grid_form_with_credentials_and_select_option(
            "test@test.com",
            "Welcome1",
            "Disabled Option",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, E2eError::NotActionable { .. }));
    assert!(app.state().submissions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_radio_option_is_not_found() {
    let app = app();
    let pm = PageManager::new(&app);
    pm.navigate_to().form_layouts_page().await.unwrap();

    let err = pm
        .on_form_layouts_page()
        .submit_using_the_grid_form_with_credentials_and_select_option("a@b.c", "pw", "Option 9")
        .await
        .unwrap_err();

    assert!(
        matches!(err, E2eError::ElementNotFound { ref selector } if selector.contains("Option 9"))
    );
}

#[tokio::test(start_paused = true)]
async fn inline_form_toggles_checkbox_only_when_needed() {
    let app = app();
    let pm = PageManager::new(&app);
    pm.navigate_to().form_layouts_page().await.unwrap();
    let forms = pm.on_form_layouts_page();

    forms
        .submit_inline_form_with_name_email_and_checkbox("John Smith", "John@test.com", true)
        .await
        .unwrap();
    forms
        .submit_inline_form_with_name_email_and_checkbox("John Smith", "John@test.com", true)
        .await
        .unwrap();
    forms
        .submit_inline_form_with_name_email_and_checkbox("Jane Doe", "jane@test.com", false)
        .await
        .unwrap();

    let state = app.state();
    let remembered: Vec<&str> = state
        .submissions
        .iter()
        .map(|s| s.fields[2].1.as_str())
        .collect();
    assert_eq!(remembered, vec!["true", "true", "false"]);
    assert_eq!(state.submissions[2].fields[0].1, "Jane Doe");
}

#[tokio::test(start_paused = true)]
async fn forms_need_their_page() {
    let app = app();
    let pm = PageManager::new(&app);

    let err = pm
        .on_form_layouts_page()
        .submit_inline_form_with_name_email_and_checkbox("John", "j@test.com", false)
        .await
        .unwrap_err();
    assert!(matches!(err, E2eError::ElementNotFound { .. }));
}
