use crate::shared::constants::{DEFAULT_TITLE, EMPTY_TRANSCRIPT_NOTICE};
use crate::shared::text::{collapse_whitespace, escape_markdown};
use crate::shared::utterance::Utterance;

use super::render_options::{RenderOptions, RenderStyle};

/// Renders utterances as a markdown document.
///
/// Output depends only on the arguments, so equal input gives byte-identical
/// output. Markdown blocks are separated by one blank line and the document
/// ends with a single newline.
pub fn render_markdown(utterances: &[Utterance], options: &RenderOptions) -> String {
    let title = options
        .title
        .as_deref()
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let mut blocks = vec![format!("# {}", escape_markdown(&title))];
    if utterances.is_empty() {
        blocks.push(EMPTY_TRANSCRIPT_NOTICE.to_string());
    } else {
        match options.style {
            RenderStyle::Sections => {
                render_sections(utterances, options.include_timestamps, &mut blocks)
            }
            RenderStyle::Compact => {
                blocks.push(render_compact(utterances, options.include_timestamps))
            }
        }
    }

    let mut document = blocks.join("\n\n");
    document.push('\n');
    document
}

/// One `##` heading per run of same-speaker utterances, then a paragraph per
/// utterance.
fn render_sections(utterances: &[Utterance], include_timestamps: bool, blocks: &mut Vec<String>) {
    let mut current_speaker: Option<&str> = None;
    for utterance in utterances {
        if current_speaker != Some(utterance.speaker()) {
            blocks.push(format!("## {}", escape_markdown(utterance.speaker())));
            current_speaker = Some(utterance.speaker());
        }
        let text = escape_markdown(utterance.text());
        if include_timestamps {
            blocks.push(format!("**[{}]** {text}", utterance.timestamp()));
        } else {
            blocks.push(text.into_owned());
        }
    }
}

fn render_compact(utterances: &[Utterance], include_timestamps: bool) -> String {
    utterances
        .iter()
        .map(|u| {
            let speaker = escape_markdown(u.speaker());
            let text = escape_markdown(u.text());
            if include_timestamps {
                format!("- **{speaker}** ({}): {text}", u.timestamp())
            } else {
                format!("- **{speaker}**: {text}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timestamp::Timestamp;

    fn utt(speaker: &str, seconds: u32, text: &str) -> Utterance {
        Utterance::new(speaker, Timestamp::from_hms(0, 0, seconds).unwrap(), text).unwrap()
    }

    fn two_speakers() -> Vec<Utterance> {
        vec![
            utt("John Doe", 5, "Hello everyone, let's get started."),
            utt("Jane Smith", 8, "Thanks John. I have updates on the project."),
        ]
    }

    /// Reads the speaker names back out of `##` headings.
    fn heading_speakers(markdown: &str) -> Vec<String> {
        markdown
            .lines()
            .filter_map(|line| line.strip_prefix("## "))
            .map(|name| name.replace('\\', ""))
            .collect()
    }

    #[test]
    fn test_two_speaker_document() {
        let markdown = render_markdown(&two_speakers(), &RenderOptions::default());
        let expected = "# Meeting Transcript\n\
                        \n\
                        ## John Doe\n\
                        \n\
                        **[00:00:05]** Hello everyone, let's get started.\n\
                        \n\
                        ## Jane Smith\n\
                        \n\
                        **[00:00:08]** Thanks John. I have updates on the project.\n";
        assert_eq!(markdown, expected);
        assert_eq!(markdown.matches("**[").count(), 2);
    }

    #[test]
    fn test_custom_title() {
        let options = RenderOptions {
            title: Some("Team Standup".to_string()),
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&two_speakers(), &options);
        assert!(markdown.starts_with("# Team Standup\n"));
    }

    #[test]
    fn test_blank_title_falls_back_to_default() {
        let options = RenderOptions {
            title: Some("   ".to_string()),
            ..RenderOptions::default()
        };
        assert!(render_markdown(&[], &options).starts_with("# Meeting Transcript\n"));
    }

    #[test]
    fn test_title_is_escaped_and_kept_on_one_line() {
        let options = RenderOptions {
            title: Some("my_notes*  draft\n[v2]".to_string()),
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&[], &options);
        assert_eq!(markdown.lines().next(), Some("# my\\_notes\\* draft \\[v2\\]"));
    }

    #[test]
    fn test_without_timestamps() {
        let options = RenderOptions {
            include_timestamps: false,
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&two_speakers(), &options);
        assert!(!markdown.contains("00:00:05"));
        assert!(markdown.contains("\n\nHello everyone, let's get started.\n"));
    }

    #[test]
    fn test_empty_renders_notice() {
        let markdown = render_markdown(&[], &RenderOptions::default());
        assert_eq!(
            markdown,
            "# Meeting Transcript\n\n*No transcript content found.*\n"
        );
        assert!(!markdown.contains("## "));
    }

    #[test]
    fn test_empty_compact_renders_notice() {
        let options = RenderOptions {
            style: RenderStyle::Compact,
            ..RenderOptions::default()
        };
        assert!(render_markdown(&[], &options).contains("No transcript content"));
    }

    #[test]
    fn test_consecutive_same_speaker_share_heading() {
        let utterances = vec![
            utt("Alice", 1, "first"),
            utt("Alice", 2, "second"),
            utt("Bob", 3, "third"),
        ];
        let markdown = render_markdown(&utterances, &RenderOptions::default());
        assert_eq!(markdown.matches("## Alice").count(), 1);
        assert!(markdown.contains("**[00:00:01]** first\n\n**[00:00:02]** second"));
    }

    #[test]
    fn test_headings_recover_speaker_sequence() {
        let utterances = vec![
            utt("Alice", 1, "a"),
            utt("Bob_the_[builder]", 2, "b"),
            utt("Alice", 3, "c"),
            utt("Zoë *", 4, "d"),
        ];
        let markdown = render_markdown(&utterances, &RenderOptions::default());
        let speakers: Vec<String> = utterances.iter().map(|u| u.speaker().to_string()).collect();
        assert_eq!(heading_speakers(&markdown), speakers);
    }

    #[test]
    fn test_markdown_metacharacters_escaped() {
        let utterances = vec![utt("*Admin*", 1, "use `cargo` and [docs] for my_var")];
        let markdown = render_markdown(&utterances, &RenderOptions::default());
        assert!(markdown.contains("## \\*Admin\\*"));
        assert!(markdown.contains("use \\`cargo\\` and \\[docs\\] for my\\_var"));
    }

    #[test]
    fn test_other_text_passes_through() {
        let utterances = vec![utt("Alice", 1, "# not a heading <b> & 100% > 5")];
        let markdown = render_markdown(&utterances, &RenderOptions::default());
        assert!(markdown.contains("**[00:00:01]** # not a heading <b> & 100% > 5"));
    }

    #[test]
    fn test_unknown_timestamp_rendered_as_placeholder() {
        let utterances = vec![Utterance::new("Alice", Timestamp::Unknown, "late").unwrap()];
        let markdown = render_markdown(&utterances, &RenderOptions::default());
        assert!(markdown.contains("**[??]** late"));
    }

    #[test]
    fn test_compact_style() {
        let options = RenderOptions {
            style: RenderStyle::Compact,
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&two_speakers(), &options);
        assert_eq!(
            markdown,
            "# Meeting Transcript\n\n\
             - **John Doe** (00:00:05): Hello everyone, let's get started.\n\
             - **Jane Smith** (00:00:08): Thanks John. I have updates on the project.\n"
        );
    }

    #[test]
    fn test_compact_without_timestamps() {
        let options = RenderOptions {
            style: RenderStyle::Compact,
            include_timestamps: false,
            ..RenderOptions::default()
        };
        let markdown = render_markdown(&[utt("Alice", 10, "Hello")], &options);
        assert!(markdown.contains("- **Alice**: Hello"));
        assert!(!markdown.contains("00:00:10"));
    }

    #[test]
    fn test_deterministic() {
        let options = RenderOptions::default();
        assert_eq!(
            render_markdown(&two_speakers(), &options),
            render_markdown(&two_speakers(), &options)
        );
    }
}
