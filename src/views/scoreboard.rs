use maud::{html, Markup, PreEscaped};

use crate::models::session::SubmittedQuiz;
use crate::views::layout;

const NOTES_SCRIPT: &str = r#"
document.getElementById('generate-notes').addEventListener('click', async (event) => {
  const status = document.getElementById('notes-status');
  event.target.disabled = true;
  status.textContent = 'Generating study notes...';
  try {
    const res = await fetch('/generate_notes', { method: 'POST' });
    const body = await res.json();
    if (body.status === 'success') {
      status.innerHTML = '';
      const link = document.createElement('a');
      link.href = '/download/' + encodeURIComponent(body.notes_path);
      link.textContent = 'Download study notes';
      status.appendChild(link);
    } else {
      status.textContent = 'Could not generate notes: ' + body.error;
    }
  } catch (err) {
    status.textContent = 'Could not generate notes.';
  } finally {
    event.target.disabled = false;
  }
});
"#;

pub fn scoreboard_page(submitted: &SubmittedQuiz, latest_notes: Option<&str>) -> Markup {
    layout(
        "Results",
        html! {
            h1 { "Results" }
            p.score { "Score: " strong { (submitted.score) "/" (submitted.total) } }

            @for (i, ans) in submitted.answers.iter().enumerate() {
                article {
                    h3 { (i + 1) ". " (ans.question.question) }
                    ul {
                        @for (letter, option) in ans.question.lettered_options() {
                            li {
                                (letter) ") " (option)
                                @if option == ans.question.correct_answer {
                                    " (Correct Answer)"
                                } @else if Some(option) == ans.user_answer.as_deref() {
                                    " (Your Answer)"
                                }
                            }
                        }
                    }
                    p {
                        "Your answer: " (ans.user_answer_label())
                        @if ans.is_correct { " - correct" } @else { " - incorrect" }
                    }
                    @if let Some(explanation) = &ans.explanation {
                        p.explanation { (explanation) }
                    }
                }
            }

            section {
                @if let Some(file) = &submitted.results_file {
                    p { a href={ "/download/" (file) } { "Download results PDF" } }
                } @else {
                    p { "The results PDF could not be created." }
                }
                button type="button" id="generate-notes" { "Generate study notes" }
                p id="notes-status" {
                    @if let Some(notes) = latest_notes {
                        a href={ "/download/" (notes) } { "Download study notes" }
                    }
                }
                p { a href="/?reset=1" { "Start a new quiz" } }
            }
            script { (PreEscaped(NOTES_SCRIPT)) }
        },
    )
}
