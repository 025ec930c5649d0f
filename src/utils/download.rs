// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::bootstrap_core::constants::download;
use crate::bootstrap_core::models::DownloadArtifact;

/// Wraps raw text into a `text/plain` data URL download.
pub fn text_artifact(filename: impl Into<String>, body: impl Into<String>) -> DownloadArtifact {
    let body = body.into();
    DownloadArtifact {
        filename: filename.into(),
        mime: download::MIME,
        href: format!("{}{}", download::DATA_URL_PREFIX, urlencoding::encode(&body)),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_encodes_body_into_href() {
        let artifact = text_artifact("app-1.0.0.json", "{\"a\": 1}\n");
        assert_eq!(artifact.mime, "text/plain;charset=utf-8");
        assert_eq!(
            artifact.href,
            "data:text/plain;charset=utf-8,%7B%22a%22%3A%201%7D%0A"
        );
        assert_eq!(artifact.body, "{\"a\": 1}\n");
    }

    #[test]
    fn href_round_trips_through_decoding() {
        let raw = "{ broken json ä €";
        let artifact = text_artifact("x.json", raw);
        let encoded = artifact.href.trim_start_matches(download::DATA_URL_PREFIX);
        assert_eq!(urlencoding::decode(encoded).unwrap(), raw);
    }
}
