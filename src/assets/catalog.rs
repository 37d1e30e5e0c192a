//! Fixed catalog of widget assets

use std::path::{Path, PathBuf};

/// Version segment of the asset layout, `static/<version>/...`
pub const SCRIPT_VERSION: &str = "v1";

/// A static file of the translate widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Short name for logs
    pub name: &'static str,
    /// Path and query relative to the widget host
    pub download_path: &'static str,
    /// Header the host requires for this asset
    pub extra_header: Option<(&'static str, &'static str)>,
    /// Location below `static/<version>/`
    pub relative_path: &'static str,
}

/// Bootstrap script, main bundle and stylesheet, in download order
pub const ASSETS: &[Asset] = &[
    Asset {
        name: "element.js",
        download_path: "translate_a/element.js?cb=cr.googleTranslate.onTranslateElementLoad&aus=true&clc=cr.googleTranslate.onLoadCSS&jlc=cr.googleTranslate.onLoadJavascript&hl=en",
        extra_header: Some(("Google-Translate-Element-Mode", "library")),
        relative_path: "element.js",
    },
    Asset {
        name: "main.js",
        download_path: "_/translate_http/_/js/k=translate_http.tr.en_US.oOC1Oa7Rttc.O/am=Bg/d=1/exm=el_conf/ed=1/rs=AN8SPfqPYBV0hk02iWIVCgyiPCEnQfgUdA/m=el_main",
        extra_header: None,
        relative_path: "js/element/main.js",
    },
    Asset {
        name: "translateelement.css",
        download_path: "translate_static/css/translateelement.css",
        extra_header: None,
        relative_path: "css/translateelement.css",
    },
];

/// `<root>/static/<version>`
pub fn static_dir(root: &Path) -> PathBuf {
    root.join("static").join(SCRIPT_VERSION)
}

impl Asset {
    /// Full download URL on the given host
    pub fn url(&self, host: &str) -> String {
        format!("{}/{}", host.trim_end_matches('/'), self.download_path)
    }

    /// Where the asset is stored below the assets root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        static_dir(root).join(self.relative_path)
    }

    /// Path the relay serves the asset on
    pub fn route(&self) -> String {
        format!("/static/{}/{}", SCRIPT_VERSION, self.relative_path)
    }
}
