//! Run-length analysis.
//!
//! Runs are detected scanning from the end of the buffer towards the start,
//! so a run "starts" at its highest index and extends downwards. Only the run
//! start receives a record; interior positions keep `RleInfo::default()`.
//! The scan jumps over a whole run at once, which keeps long zero-fills linear.

use super::types::RleInfo;

/// Build the run-length record for every position of `buf`.
pub fn analyze(buf: &[u8]) -> Vec<RleInfo> {
    let mut info = vec![RleInfo::default(); buf.len()];
    if buf.is_empty() {
        return info;
    }

    let mut get = buf.len() - 1;
    while get > 0 {
        let cur = buf[get];
        if cur != buf[get - 1] {
            get -= 1;
            continue;
        }

        let mut len = 2;
        while get >= len && buf[get - len] == cur {
            len += 1;
        }

        // A run reaching index 0 has no terminating byte; reuse the run value.
        let value_after = if get >= len { buf[get - len] } else { cur };
        info[get] = RleInfo {
            length: len,
            value_after,
        };

        match get.checked_sub(len) {
            Some(g) => get = g,
            None => break,
        }
    }

    info
}
