// Synchronous screen drivers
//
// Each driver runs begin -> backend call -> finish on the calling thread.
// Hosts that must not block use `AppContext::spawn` and call the flow's
// finish half themselves.

use std::time::Instant;

use agridoc_core::advisor::AdvisorFlow;
use agridoc_core::chat::ChatSession;
use agridoc_core::dashboard::Dashboard;
use agridoc_core::location::LocationSetup;
use agridoc_core::scan::{ScanFlow, ScanImage};
use agridoc_core::schemes::SchemeBrowser;
use agridoc_core::UserProfile;

use crate::context::{AppContext, AppError};

impl AppContext {
    /// Point the dashboard cards at the saved coordinates, fetching each
    /// card whose coordinates changed. Returns true if anything was fetched.
    pub fn refresh_dashboard(&self, dashboard: &mut Dashboard) -> bool {
        let coords = self.profile.get().coordinates();
        let mut fetched = false;
        if dashboard.weather.track(coords) {
            dashboard.weather.finish(coords, self.backend().weather(coords));
            fetched = true;
        }
        if dashboard.climate.track(coords) {
            dashboard.climate.finish(coords, self.backend().climate(coords));
            fetched = true;
        }
        fetched
    }

    /// Manual refresh of both cards at their current coordinates.
    pub fn reload_dashboard(&self, dashboard: &mut Dashboard) {
        if let Some(coords) = dashboard.weather.reload() {
            dashboard.weather.finish(coords, self.backend().weather(coords));
        }
        if let Some(coords) = dashboard.climate.reload() {
            dashboard.climate.finish(coords, self.backend().climate(coords));
        }
    }

    pub fn search_location(&self, setup: &mut LocationSetup) {
        if let Some(query) = setup.begin_search() {
            setup.finish_search(self.places().lookup(&query));
        }
    }

    /// Persist the confirmed location. The profile is untouched on error.
    pub fn save_location(&self, setup: &mut LocationSetup) -> Result<UserProfile, AppError> {
        let next = setup.save(&self.profile.get())?;
        self.profile.set(next.clone())?;
        log::info!("location saved: {}", next.location_name);
        Ok(next)
    }

    pub fn analyze_scan(&self, scan: &mut ScanFlow) -> Result<(), AppError> {
        let image = scan.begin_analysis()?;
        scan.finish(self.backend().detect_disease(&image));
        Ok(())
    }

    /// Send one chat turn in the current app language.
    pub fn send_chat(
        &self,
        chat: &mut ChatSession,
        text: &str,
        image: Option<&ScanImage>,
    ) -> Result<(), AppError> {
        let lang = self.lang.get();
        if chat.lang() != lang {
            chat.set_lang(lang);
        }
        let request = chat.begin_send(text, image.map(ScanImage::to_data_url))?;
        chat.complete(self.backend().diagnose(&request));
        Ok(())
    }

    /// Issue the scheme query if its debounce window has elapsed.
    pub fn poll_schemes(&self, browser: &mut SchemeBrowser, now: Instant) -> bool {
        match browser.poll(now) {
            Some(query) => {
                browser.finish_listing(self.backend().schemes(&query));
                true
            }
            None => false,
        }
    }

    pub fn load_scheme_categories(&self, browser: &mut SchemeBrowser) {
        browser.finish_categories(self.backend().scheme_categories());
    }

    pub fn request_plan(&self, advisor: &mut AdvisorFlow, practice: &str) -> bool {
        match advisor.begin(practice, &self.profile.get()) {
            Some(request) => {
                advisor.finish(self.backend().plan(&request));
                true
            }
            None => false,
        }
    }
}
