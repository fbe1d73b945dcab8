//! Decides whether the tracker should run at all.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_MOBILE_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(android|bb\d+|meego).+mobile|avantgo|bada/|blackberry|blazer|compal|elaine|fennec|hiptop|iemobile|ip(hone|od)|iris|kindle|lge |maemo|midp|mmp|mobile.+firefox|netfront|opera m(ob|in)i|palm( os)?|phone|p(ixi|re)/|plucker|pocket|psp|series(4|6)0|symbian|treo|up\.(browser|link)|vodafone|wap|windows ce|xda|xiino|android|ipad|playbook|silk",
    )
    .unwrap()
});

pub trait DeviceClassifier {
    fn is_mobile_or_tablet(&self) -> bool;
}

/// Classifies by user-agent string.
#[derive(Debug, Clone)]
pub struct UserAgentClassifier {
    user_agent: String,
}

impl UserAgentClassifier {
    pub fn new(user_agent: impl Into<String>) -> Self {
        UserAgentClassifier {
            user_agent: user_agent.into(),
        }
    }
}

impl DeviceClassifier for UserAgentClassifier {
    fn is_mobile_or_tablet(&self) -> bool {
        RE_MOBILE_AGENT.is_match(&self.user_agent)
    }
}

/// Always reports a desktop context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Desktop;

impl DeviceClassifier for Desktop {
    fn is_mobile_or_tablet(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_agents_are_not_mobile() {
        let agent = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        assert!(!UserAgentClassifier::new(agent).is_mobile_or_tablet());
    }

    #[test]
    fn phones_and_tablets_are_mobile() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        let ipad = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari";
        for agent in [iphone, ipad, android] {
            assert!(UserAgentClassifier::new(agent).is_mobile_or_tablet(), "{agent}");
        }
    }
}
