//! # Conversation Prompts
//!
//! File: bot/src/conversation/prompts.rs
//!
//! ## Overview
//!
//! Every message the engine can send. Replies are written in the small HTML
//! subset Telegram accepts (`<b>`, `<a>`), and `Reply::plain_text` strips that
//! markup for the console calculator.
//!
use super::grades::Grade;
use super::report::GpaReport;
use crate::core::error::InputError;

/// One outbound message, formatted as Telegram HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    html: String,
}

impl Reply {
    fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// The message with tags removed and entities decoded.
    ///
    /// Only correct for markup built in this module: every dynamic string is
    /// passed through `escape_html` first, so a literal `<` never appears
    /// outside a tag and the four entities it emits are the only ones decoded.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.html.len());
        let mut in_tag = false;
        for ch in self.html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }
}

/// Escapes text for inclusion in an HTML-formatted reply.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Greeting sent on `/start`. `mention` must already be valid HTML.
pub fn greeting(mention: &str) -> Reply {
    Reply::new(format!(
        "Hi {mention}! 👋 I'm the GPA Calculator bot.\n\n\
         I'll help you calculate your semester GPA. Let's get started!\n\n\
         <b>How many courses did you take this semester?</b> (e.g., 5)"
    ))
}

pub fn course_count_rejected(err: InputError) -> Reply {
    match err {
        InputError::NotPositive => Reply::new("Please enter a positive number of courses."),
        _ => Reply::new("That doesn't look like a number. Please enter a number, like 5."),
    }
}

/// Sent once the course count is accepted; also asks for the first grade.
pub fn course_count_accepted(total: u32) -> Reply {
    Reply::new(format!(
        "Great! Let's enter the details for {total} courses, one by one.\n\n\
         <b>Enter the GRADE for course #1</b> (e.g., A, B+, C)"
    ))
}

pub fn grade_rejected() -> Reply {
    Reply::new(format!(
        "Hmm, that's not a valid grade. Please use one of these:\n{}",
        Grade::token_list()
    ))
}

pub fn grade_accepted(grade: Grade) -> Reply {
    Reply::new(format!(
        "Got it. Grade is '{grade}'.\n\n\
         <b>Now, enter the CREDIT HOURS for this course:</b>"
    ))
}

pub fn credits_rejected(err: InputError) -> Reply {
    match err {
        InputError::NotPositive => {
            Reply::new("Credit hours must be a positive number. Try again.")
        }
        _ => Reply::new("That's not a valid number. Please enter the credit hours again."),
    }
}

pub fn next_grade(course: u32) -> Reply {
    Reply::new(format!("<b>Enter the GRADE for course #{course}</b>"))
}

pub fn final_report(report: &GpaReport) -> Reply {
    Reply::new(format!(
        "✅ All done! Here is your result:\n\n\
         <b>Total Credit Hours:</b> {}\n\
         <b>Total Grade Points:</b> {}\n\n\
         🎉 <b>Your Semester GPA is: {}</b> 🎉\n\n\
         Type /start to calculate again.",
        report.total_credits,
        report.total_points_display(),
        report.gpa_display()
    ))
}

pub fn cancelled() -> Reply {
    Reply::new("Calculation cancelled. Type /start anytime to begin again.")
}

pub fn nothing_to_cancel() -> Reply {
    Reply::new("There is no calculation in progress. Type /start to begin.")
}

/// Reply to free text when no conversation is running.
pub fn idle_hint() -> Reply {
    Reply::new("Type /start to calculate your GPA, or /help to see the grade scale.")
}

pub fn help() -> Reply {
    let scale = Grade::ALL
        .iter()
        .map(|g| format!("{:<2} = {:.2}", g.token(), g.points()))
        .collect::<Vec<_>>()
        .join("\n");
    Reply::new(format!(
        "<b>Grade scale</b>\n{}\n\n\
         /start - begin a new GPA calculation\n\
         /cancel - stop the current calculation\n\
         /help - show this message",
        escape_html(&scale)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_markup() {
        let reply = next_grade(3);
        assert_eq!(reply.html(), "<b>Enter the GRADE for course #3</b>");
        assert_eq!(reply.plain_text(), "Enter the GRADE for course #3");
    }

    #[test]
    fn plain_text_decodes_escaped_names() {
        let reply = greeting(&escape_html("Tom & <Jerry>"));
        assert!(reply.html().contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(reply.plain_text().starts_with("Hi Tom & <Jerry>!"));
    }

    #[test]
    fn plain_text_recovers_any_escaped_text() {
        for name in ["&lt;b&gt;", "\"quoted\" > <", "a&&b", "<a href=\"x\">"] {
            let mention = format!("<a href=\"tg://user?id=1\">{}</a>", escape_html(name));
            let plain = greeting(&mention).plain_text();
            assert!(plain.starts_with(&format!("Hi {name}!")), "{plain}");
        }
    }

    #[test]
    fn grade_rejection_lists_the_scale() {
        let text = grade_rejected().plain_text();
        assert!(text.contains("A+, A, A-, B+, B, B-, C+, C, D, F"));
    }

    #[test]
    fn numeric_rejections_distinguish_cause() {
        assert_ne!(
            course_count_rejected(InputError::NotPositive),
            course_count_rejected(InputError::NotANumber)
        );
        assert_ne!(
            credits_rejected(InputError::NotPositive),
            credits_rejected(InputError::NotANumber)
        );
    }

    #[test]
    fn help_lists_every_grade_and_command() {
        let text = help().plain_text();
        for grade in Grade::ALL {
            assert!(text.contains(grade.token()));
        }
        assert!(text.contains("A- = 3.75"));
        for command in ["/start", "/cancel", "/help"] {
            assert!(text.contains(command));
        }
    }
}
