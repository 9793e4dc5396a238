//! Scripted stand-ins for yt-dlp and ffmpeg.
//!
//! Each fake appends its argv to `<name>.log` next to the script and creates
//! the file the real tool would have produced.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;

pub struct FakeTools {
    pub dir: tempfile::TempDir,
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf
}

impl FakeTools {
    /// `produced_ext`: extension the fake yt-dlp writes, or `None` for no file.
    pub fn new(produced_ext: Option<&str>, ytdlp_exit: i32, ffmpeg_exit: i32) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let ytdlp = write_script(dir.path(), "yt-dlp", &ytdlp_script(dir.path(), produced_ext, ytdlp_exit));
        let ffmpeg = write_script(dir.path(), "ffmpeg", &ffmpeg_script(dir.path(), ffmpeg_exit));
        Self { dir, ytdlp, ffmpeg }
    }

    /// yt-dlp sleeps for a second, then touches [`FakeTools::marker`] and
    /// writes an mp4. The marker only appears if the process was not killed.
    pub fn slow_fetch() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let body = ytdlp_script(dir.path(), Some("mp4"), 0).replacen(
            "out=''\n",
            &format!("sleep 1\ntouch '{}'\nout=''\n", dir.path().join("finished").display()),
            1
        );
        let ytdlp = write_script(dir.path(), "yt-dlp", &body);
        let ffmpeg = write_script(dir.path(), "ffmpeg", &ffmpeg_script(dir.path(), 0));
        Self { dir, ytdlp, ffmpeg }
    }

    /// Both tools hang without producing output.
    pub fn hanging() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let ytdlp = write_script(dir.path(), "yt-dlp", "#!/bin/sh\nexec sleep 30\n");
        let ffmpeg = write_script(dir.path(), "ffmpeg", "#!/bin/sh\nexec sleep 30\n");
        Self { dir, ytdlp, ffmpeg }
    }

    pub fn marker(&self) -> PathBuf {
        self.dir.path().join("finished")
    }

    pub fn config(&self) -> FetchConfig {
        FetchConfig::new()
            .ytdlp(&self.ytdlp)
            .ffmpeg(&self.ffmpeg)
            .output_dir(self.output_dir())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn invocations(&self, tool: &str) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join(format!("{tool}.log")))
            .map(|s| s.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Files currently in the output directory, sorted.
    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.output_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

fn ytdlp_script(dir: &Path, produced_ext: Option<&str>, exit_code: i32) -> String {
    let create = match produced_ext {
        Some(ext) => format!(
            "mkdir -p \"$(dirname \"$out\")\"\n\
             target=$(printf '%s' \"$out\" | sed 's/%(ext)s$/{ext}/')\n\
             printf 'media' > \"$target\"\n"
        ),
        None => String::new()
    };
    format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$*\" >> '{log}'\n\
         out=''\n\
         while [ $# -gt 0 ]; do\n\
           if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
           shift\n\
         done\n\
         if [ {exit_code} -ne 0 ]; then echo 'ERROR: fake failure' >&2; exit {exit_code}; fi\n\
         {create}\
         exit 0\n",
        log = dir.join("yt-dlp.log").display()
    )
}

fn ffmpeg_script(dir: &Path, exit_code: i32) -> String {
    format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$*\" >> '{log}'\n\
         if [ {exit_code} -ne 0 ]; then echo 'fake ffmpeg failure' >&2; exit {exit_code}; fi\n\
         for last; do :; done\n\
         printf 'converted' > \"$last\"\n\
         exit 0\n",
        log = dir.join("ffmpeg.log").display()
    )
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    path
}
