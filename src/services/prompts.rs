use crate::models::question::{Difficulty, Question, QuizSource};

const MCQ_FORMAT: &str = r#"Format exactly like this for each question:
## MCQ
Question: [question text]
A) [option A]
B) [option B]
C) [option C]
D) [option D]
Correct Answer: [letter of correct option]

Ensure each question has exactly 4 options and one correct answer."#;

const FILE_INSTRUCTIONS: &str = r#"Additional instructions for file-based questions:
1. Use ONLY the information from the provided text content
2. Focus on key concepts and important details from the text
3. Include questions about specific facts, figures, or data mentioned in the text
4. Create questions that test comprehension of the main ideas and supporting details
5. Ensure questions are directly related to the content in the file
6. Include at least one question about any tables, lists, or structured data if present
7. Cover a broad range of topics from the text
8. Ensure questions are well-distributed across different sections of the content"#;

const TOPIC_INSTRUCTIONS: &str = r#"Additional instructions for topic-based questions:
1. Create questions that cover the main aspects of the topic
2. Include both theoretical and practical questions
3. Ensure questions are relevant to the given topic
4. Create a good mix of definition, concept, and application questions
5. Cover fundamental concepts and advanced aspects of the topic
6. Include questions about key terminology and important principles
7. Ensure questions test both understanding and application
8. Create questions that help build a comprehensive understanding of the topic"#;

pub fn mcq_prompt(source: &QuizSource, num_questions: usize, difficulty: Difficulty) -> String {
    let (lead, instructions) = match source {
        QuizSource::Topic(_) => ("from the following topic", TOPIC_INSTRUCTIONS),
        QuizSource::File { .. } => ("from the following text content", FILE_INSTRUCTIONS),
    };

    format!(
        "Generate {} multiple-choice questions {}:\n{}\n\n{}\n\n{}\n\n{}\n",
        num_questions,
        lead,
        source.content(),
        difficulty.guidance(),
        instructions,
        MCQ_FORMAT
    )
}

pub fn explanation_prompt(question: &str, correct_answer: &str) -> String {
    format!(
        "Explain why '{}' is the correct answer to:\n'{}'\n\nProvide a clear, concise explanation in 2-3 sentences.\n",
        correct_answer, question
    )
}

pub fn notes_prompt(source_text: &str, questions: &[Question]) -> String {
    let questions_text = questions
        .iter()
        .map(|q| format!("Q: {}\nA: {}", q.question, q.correct_answer))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Create comprehensive study notes (minimum 500 words) based on:
1. Original topic/content: {}
2. Generated questions: {}

Format requirements:
- Organize by topics/subtopics
- Use clear headings ending with a colon
- Present key points in bullet lists
- Include explanations for important concepts
- Maintain academic tone but keep it readable
- Minimum 500 words

Output should be well-structured for effective studying. It should not contain any bold words or symbols.
"#,
        source_text, questions_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_prompt_carries_count_difficulty_and_format() {
        let prompt = mcq_prompt(&QuizSource::Topic("Photosynthesis".into()), 7, Difficulty::Hard);
        assert!(prompt.starts_with("Generate 7 multiple-choice questions from the following topic:\nPhotosynthesis"));
        assert!(prompt.contains(Difficulty::Hard.guidance()));
        assert!(prompt.contains("topic-based questions"));
        assert!(prompt.contains("## MCQ\nQuestion: [question text]"));
        assert!(prompt.contains("Correct Answer: [letter of correct option]"));
    }

    #[test]
    fn file_prompt_uses_file_instructions() {
        let source = QuizSource::File {
            filename: "notes.txt".into(),
            content: "Mitochondria produce ATP.".into(),
        };
        let prompt = mcq_prompt(&source, 3, Difficulty::Easy);
        assert!(prompt.contains("from the following text content:\nMitochondria produce ATP."));
        assert!(prompt.contains("Use ONLY the information from the provided text content"));
        assert!(!prompt.contains("topic-based"));
    }

    #[test]
    fn prompts_are_deterministic() {
        let source = QuizSource::Topic("Rust".into());
        assert_eq!(
            mcq_prompt(&source, 5, Difficulty::Intermediate),
            mcq_prompt(&source, 5, Difficulty::Intermediate)
        );
    }

    #[test]
    fn explanation_prompt_quotes_answer_and_question() {
        let prompt = explanation_prompt("Capital of Italy?", "Rome");
        assert!(prompt.starts_with("Explain why 'Rome' is the correct answer to:\n'Capital of Italy?'"));
    }

    #[test]
    fn notes_prompt_lists_question_answer_pairs() {
        let q = Question::from_letter(
            "Capital of Italy?".into(),
            ["Paris", "Rome", "Berlin", "Madrid"].map(String::from),
            1,
        )
        .unwrap();
        let prompt = notes_prompt("European capitals", &[q]);
        assert!(prompt.contains("Original topic/content: European capitals"));
        assert!(prompt.contains("Q: Capital of Italy?\nA: Rome"));
    }
}
