//! Localized display strings
//!
//! Strings are looked up by key in the table of the selected [`Locale`].
//! Arguments are substituted into `{0}`, `{1}`, ... placeholders. Unknown keys
//! resolve to the key itself so a missing translation never blanks a widget.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "de")]
    German,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::German];

    /// Name of the language in that language
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::German => "Deutsch",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "en_US",
            Locale::German => "de_DE",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::English => EN,
            Locale::German => DE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

const EN: &[(&str, &str)] = &[
    ("appTitle", "BCozy"),
    ("units", "Units"),
    ("groups", "Groups"),
    ("settings", "Settings"),
    ("login", "Login"),
    ("logout", "Logout"),
    ("startLogin", "Press Enter to log in"),
    ("username", "Username"),
    ("password", "Password"),
    ("loggedInAs", "Logged in as {0}"),
    ("notLoggedIn", "Not logged in"),
    ("inputWrong", "Wrong username or password"),
    ("language", "Language"),
    ("powerOn", "Power consumption active"),
    ("powerOff", "No power consumption"),
    ("currentPower", "Current Power:"),
    ("powerConsumption", "Power Consumption:"),
    ("currentVoltage", "Current Voltage:"),
    ("switchOn", "Switched on"),
    ("switchOff", "Switched off"),
    ("powerState", "Power State:"),
    ("motionDetected", "Motion detected"),
    ("noMotion", "No motion"),
    ("motionState", "Motion:"),
    ("lastChange", "Last Change:"),
    ("heating", "Heating"),
    ("notHeating", "Target temperature reached"),
    ("temperature", "Temperature:"),
    ("targetTemperature", "Target Temperature:"),
    ("on", "on"),
    ("off", "off"),
    ("unavailable", "unavailable"),
    ("noUnits", "No units available"),
    ("unknownLocation", "Unassigned"),
    ("groupLabel", "Group name"),
    ("noGroups", "No authorization groups"),
    ("saveSuccess", "Saved successfully"),
    ("saveErrorWithMessage", "Could not save: {0}"),
    ("deleteSuccess", "Deleted successfully"),
    ("deleteErrorWithMessage", "Could not delete: {0}"),
    ("bindErrorWithMessage", "Could not observe unit: {0}"),
    ("emptyGroupName", "Group name must not be empty"),
    ("languageChanged", "Language changed"),
    ("windowTitle", "BCozy - Home Automation"),
];

const DE: &[(&str, &str)] = &[
    ("appTitle", "BCozy"),
    ("units", "Geräte"),
    ("groups", "Gruppen"),
    ("settings", "Einstellungen"),
    ("login", "Anmelden"),
    ("logout", "Abmelden"),
    ("startLogin", "Enter drücken zum Anmelden"),
    ("username", "Benutzername"),
    ("password", "Passwort"),
    ("loggedInAs", "Angemeldet als {0}"),
    ("notLoggedIn", "Nicht angemeldet"),
    ("inputWrong", "Benutzername oder Passwort falsch"),
    ("language", "Sprache"),
    ("powerOn", "Stromverbrauch aktiv"),
    ("powerOff", "Kein Stromverbrauch"),
    ("currentPower", "Aktuelle Leistung:"),
    ("powerConsumption", "Stromverbrauch:"),
    ("currentVoltage", "Aktuelle Spannung:"),
    ("switchOn", "Eingeschaltet"),
    ("switchOff", "Ausgeschaltet"),
    ("powerState", "Schaltzustand:"),
    ("motionDetected", "Bewegung erkannt"),
    ("noMotion", "Keine Bewegung"),
    ("motionState", "Bewegung:"),
    ("lastChange", "Letzte Änderung:"),
    ("heating", "Heizt"),
    ("notHeating", "Zieltemperatur erreicht"),
    ("temperature", "Temperatur:"),
    ("targetTemperature", "Zieltemperatur:"),
    ("on", "an"),
    ("off", "aus"),
    ("unavailable", "nicht verfügbar"),
    ("noUnits", "Keine Geräte verfügbar"),
    ("unknownLocation", "Nicht zugeordnet"),
    ("groupLabel", "Gruppenname"),
    ("noGroups", "Keine Berechtigungsgruppen"),
    ("saveSuccess", "Erfolgreich gespeichert"),
    ("saveErrorWithMessage", "Speichern fehlgeschlagen: {0}"),
    ("deleteSuccess", "Erfolgreich gelöscht"),
    ("deleteErrorWithMessage", "Löschen fehlgeschlagen: {0}"),
    ("bindErrorWithMessage", "Gerät kann nicht beobachtet werden: {0}"),
    ("emptyGroupName", "Gruppenname darf nicht leer sein"),
    ("languageChanged", "Sprache geändert"),
    ("windowTitle", "BCozy - Hausautomation"),
];

type TextObserver = Box<dyn Fn(Locale, &str) + Send>;

/// Locale selection plus string lookup
pub struct Localization {
    locale_tx: watch::Sender<Locale>,
    observers: Vec<(String, TextObserver)>,
}

impl std::fmt::Debug for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localization")
            .field("locale", &self.locale())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Localization {
    pub fn new(locale: Locale) -> Self {
        let (locale_tx, _) = watch::channel(locale);
        Self {
            locale_tx,
            observers: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        *self.locale_tx.borrow()
    }

    /// Switch the display language and notify every observer.
    ///
    /// Returns false if the locale was already selected.
    pub fn set_locale(&mut self, locale: Locale) -> bool {
        if self.locale() == locale {
            return false;
        }
        self.locale_tx.send_replace(locale);
        tracing::info!("Locale changed to {}", locale);
        for (key, observer) in &self.observers {
            observer(locale, &lookup(locale, key, &[]));
        }
        true
    }

    /// Watch locale changes from another task
    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.locale_tx.subscribe()
    }

    /// Register a callback that receives the text for `key` now and after
    /// every locale change.
    pub fn add_observer_for<F>(&mut self, key: impl Into<String>, observer: F)
    where
        F: Fn(Locale, &str) + Send + 'static,
    {
        let key = key.into();
        let locale = self.locale();
        observer(locale, &lookup(locale, &key, &[]));
        self.observers.push((key, Box::new(observer)));
    }

    /// Text for `key` in the current locale
    pub fn text(&self, key: &str) -> String {
        lookup(self.locale(), key, &[])
    }

    /// Text for `key` with `{n}` placeholders replaced by `args`
    pub fn get_localized(&self, key: &str, args: &[&str]) -> String {
        lookup(self.locale(), key, args)
    }
}

fn lookup(locale: Locale, key: &str, args: &[&str]) -> String {
    let template = locale
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text);

    let Some(template) = template else {
        tracing::trace!("No {} translation for key {:?}", locale, key);
        return key.to_string();
    };

    fill(template, args)
}

/// Replace every `{n}` in `template` with `args[n]` in one pass, so text
/// coming from an argument is never scanned for placeholders again
fn fill(template: &str, args: &[&str]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| (*arg, close))
        });
        match arg {
            Some((arg, close)) => {
                text.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_arguments_are_not_rescanned() {
        assert_eq!(fill("{0} / {1}", &["a{1}", "b"]), "a{1} / b");
        assert_eq!(fill("{1}{0}", &["x", "y"]), "yx");
        assert_eq!(fill("{9} {x} {", &["a"]), "{9} {x} {");
        assert_eq!(fill("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn test_text_in_default_locale() {
        let i18n = Localization::default();
        assert_eq!(i18n.text("saveSuccess"), "Saved successfully");
    }

    #[test]
    fn test_placeholder_substitution() {
        let i18n = Localization::new(Locale::German);
        assert_eq!(
            i18n.get_localized("saveErrorWithMessage", &["exists"]),
            "Speichern fehlgeschlagen: exists"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let i18n = Localization::default();
        assert_eq!(i18n.text("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_tables_have_identical_keys() {
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        let de: Vec<_> = DE.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, de);
    }

    #[test]
    fn test_observer_receives_initial_and_changed_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut i18n = Localization::default();

        let sink = seen.clone();
        i18n.add_observer_for("groupLabel", move |locale, text| {
            sink.lock().unwrap().push((locale, text.to_string()));
        });
        assert!(i18n.set_locale(Locale::German));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (Locale::English, "Group name".to_string()),
                (Locale::German, "Gruppenname".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_same_locale_is_noop() {
        let mut i18n = Localization::default();
        assert!(!i18n.set_locale(Locale::English));
    }

    #[test]
    fn test_subscribe_sees_locale_change() {
        let mut i18n = Localization::default();
        let mut rx = i18n.subscribe();
        i18n.set_locale(Locale::German);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Locale::German);
    }
}
