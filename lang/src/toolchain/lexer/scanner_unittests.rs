#[cfg(test)]
mod tests {
    use crate::toolchain::diagnostics::diagnostic_kind::LexerDiagnosticKind;
    use crate::toolchain::lexer::scanner::Scanner;
    use crate::toolchain::lexer::{Symbol, Token};

    fn scanner(text: &str) -> Scanner {
        Scanner::new(text.chars().collect())
    }

    // Scans all of `text`, pairing each token with its collected text.
    fn scan_all(text: &str) -> Vec<(Token, String)> {
        let mut scanner = scanner(text);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token();
            tokens.push((token, scanner.collected_text().iter().collect()));
            if token.kind == Symbol::EndOfFile {
                return tokens;
            }
        }
    }

    fn check_single(text: &str, kind: Symbol) {
        let mut scanner = scanner(text);
        let len = text.chars().count() as u32;
        assert_eq!(scanner.next_token(), Token::new(kind, 0, len), "scanning {:?}", text);
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, len, len));
    }

    #[test]
    fn empty_input() {
        let mut scanner = scanner("");
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 0, 0));
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 0, 0));
        assert!(scanner.collected_text().is_empty());
        assert!(scanner.issues().is_empty());
    }

    #[test]
    fn blank_space_only() {
        let mut scanner = scanner(" \t\r\n  ");
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 6, 6));
    }

    #[test]
    fn single_character_operators() {
        let cases = [
            ("(", Symbol::LeftParen),
            (")", Symbol::RightParen),
            ("[", Symbol::LeftBracket),
            ("]", Symbol::RightBracket),
            ("{", Symbol::LeftBrace),
            ("}", Symbol::RightBrace),
            ("|", Symbol::Bar),
            ("#", Symbol::NotEqual),
            ("&", Symbol::And),
            (",", Symbol::Comma),
            ("-", Symbol::Minus),
            ("/", Symbol::Slash),
            (";", Symbol::SemiColon),
            ("=", Symbol::Equal),
            ("^", Symbol::Arrow),
            ("~", Symbol::Not),
            ("\\", Symbol::BackSlash),
            ("`", Symbol::Transpose),
            ("*", Symbol::Times),
            ("+", Symbol::Plus),
            (":", Symbol::Colon),
            ("<", Symbol::Less),
            (">", Symbol::Greater),
            ("?", Symbol::QuestionMark),
            ("!", Symbol::ExclaimMark),
            (".", Symbol::Period),
        ];
        for (text, kind) in cases {
            check_single(text, kind);
        }
    }

    #[test]
    fn multi_character_operators() {
        let cases = [
            ("**", Symbol::TimesTimes),
            ("+*", Symbol::PlusTimes),
            (":=", Symbol::Becomes),
            ("<=", Symbol::LessEqual),
            ("<<", Symbol::LessLess),
            ("<<?", Symbol::LessLessQ),
            (">=", Symbol::GreaterEqual),
            (">>", Symbol::GreaterGreater),
            (">>?", Symbol::GreaterGreaterQ),
            ("??", Symbol::QuestionMarks),
            ("!!", Symbol::ExclaimMarks),
            ("..", Symbol::Upto),
            (".*", Symbol::DotTimes),
            ("./", Symbol::DotSlash),
            (".=", Symbol::DotEqual),
            (".#", Symbol::DotUnEqual),
            (".<", Symbol::DotLess),
            (".<=", Symbol::DotLessEqual),
            (".>", Symbol::DotGreater),
            (".>=", Symbol::DotGreaterEqual),
        ];
        for (text, kind) in cases {
            check_single(text, kind);
        }
    }

    #[test]
    fn maximal_munch_then_remainder() {
        let kinds: Vec<Symbol> = scan_all("<<?<<<=>>?>").iter().map(|(t, _)| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Symbol::LessLessQ,
                Symbol::LessLess,
                Symbol::LessEqual,
                Symbol::GreaterGreaterQ,
                Symbol::Greater,
                Symbol::EndOfFile
            ]
        );
    }

    #[test]
    fn reserved_words() {
        let cases = [
            ("AWAIT", Symbol::Await),
            ("BEGIN", Symbol::Begin),
            ("BY", Symbol::By),
            ("CONST", Symbol::Const),
            ("CASE", Symbol::Case),
            ("CELL", Symbol::Cell),
            ("CELLNET", Symbol::Cellnet),
            ("DEFINITION", Symbol::Definition),
            ("DO", Symbol::Do),
            ("DIV", Symbol::Div),
            ("END", Symbol::End),
            ("ENUM", Symbol::Enum),
            ("ELSE", Symbol::Else),
            ("ELSIF", Symbol::Elsif),
            ("EXIT", Symbol::Exit),
            ("EXTERN", Symbol::Extern),
            ("FALSE", Symbol::False),
            ("FOR", Symbol::For),
            ("FINALLY", Symbol::Finally),
            ("IF", Symbol::If),
            ("IGNORE", Symbol::Ignore),
            ("IMAG", Symbol::Imag),
            ("IN", Symbol::In),
            ("IS", Symbol::Is),
            ("IMPORT", Symbol::Import),
            ("LOOP", Symbol::Loop),
            ("MODULE", Symbol::Module),
            ("MOD", Symbol::Mod),
            ("NIL", Symbol::Nil),
            ("OF", Symbol::Of),
            ("OR", Symbol::Or),
            ("OUT", Symbol::Out),
            ("OPERATOR", Symbol::Operator),
            ("PROCEDURE", Symbol::Procedure),
            ("PORT", Symbol::Port),
            ("REPEAT", Symbol::Repeat),
            ("RETURN", Symbol::Return),
            ("SELF", Symbol::Self_),
            ("NEW", Symbol::New),
            ("RESULT", Symbol::Result),
            ("THEN", Symbol::Then),
            ("TRUE", Symbol::True),
            ("TO", Symbol::To),
            ("TYPE", Symbol::Type),
            ("UNTIL", Symbol::Until),
            ("VAR", Symbol::Var),
            ("WHILE", Symbol::While),
            ("WITH", Symbol::With),
            ("ANY", Symbol::Any),
            ("ARRAY", Symbol::Array),
            ("OBJECT", Symbol::Object),
            ("POINTER", Symbol::Pointer),
            ("RECORD", Symbol::Record),
            ("ADDRESS", Symbol::Address),
            ("SIZE", Symbol::Size),
            ("ALIAS", Symbol::Alias),
        ];
        for (text, kind) in cases {
            check_single(text, kind);
            let mut scanner = scanner(text);
            scanner.next_token();
            assert!(scanner.collected_text().is_empty());
        }
    }

    #[test]
    fn keyword_match_is_exact() {
        for text in ["ALiAS", "UNTILX", "until", "_END", "End", "BEGIN1"] {
            let mut scanner = scanner(text);
            let token = scanner.next_token();
            assert_eq!(token, Token::new(Symbol::Ident, 0, text.len() as u32));
            assert_eq!(scanner.collected_text().iter().collect::<String>(), text);
        }
    }

    #[test]
    fn collected_text_is_recycled() {
        let mut scanner = scanner("alpha beta;");
        assert_eq!(scanner.next_token().kind, Symbol::Ident);
        assert_eq!(scanner.next_token().kind, Symbol::Ident);
        assert_eq!(scanner.collected_text(), &['b', 'e', 't', 'a']);
        assert_eq!(scanner.next_token().kind, Symbol::SemiColon);
        assert!(scanner.collected_text().is_empty());
    }

    #[test]
    fn span_round_trip() {
        let text = "MODULE Test;\n  VAR x*: ARRAY 10 OF INTEGER; (* note *)\nBEGIN x[1..5] := 0FFH END Test.";
        let chars: Vec<char> = text.chars().collect();
        let mut rebuilt = String::new();
        let mut position = 0;
        for (token, _) in scan_all(text) {
            assert!(token.start <= token.end);
            assert!(position <= token.start as usize);
            // Only blank space and comments lie between tokens.
            let gap: String = chars[position..token.start as usize].iter().collect();
            assert!(gap.trim().is_empty() || gap.trim() == "(* note *)", "gap {:?}", gap);
            rebuilt.push_str(&gap);
            rebuilt.extend(&chars[token.start as usize..token.end as usize]);
            position = token.end as usize;
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn non_ascii_source_positions_count_characters() {
        let tokens = scan_all("\"äöü\" x");
        assert_eq!(tokens[0].0, Token::new(Symbol::String, 0, 5));
        assert_eq!(tokens[0].1, "\"äöü\"");
        assert_eq!(tokens[1].0, Token::new(Symbol::Ident, 6, 7));
    }

    #[test]
    fn integers() {
        let texts =
            ["0", "42", "1`000`000", "0FFH", "7FH", "0x1F", "0xdead`beef", "0b1010", "0b1`0"];
        for text in texts {
            let tokens = scan_all(text);
            assert_eq!(tokens[0].0, Token::new(Symbol::Integer, 0, text.len() as u32), "{}", text);
            assert_eq!(tokens[0].1, text);
            assert_eq!(tokens[1].0.kind, Symbol::EndOfFile);
        }
    }

    #[test]
    fn reals() {
        for text in ["1.5", "1.", "3.14E10", "2.0E-3", "6.02D+23"] {
            let tokens = scan_all(text);
            assert_eq!(tokens[0].0, Token::new(Symbol::Real, 0, text.len() as u32), "{}", text);
            assert_eq!(tokens[0].1, text);
        }
    }

    #[test]
    fn integer_followed_by_upto() {
        let tokens = scan_all("1..5");
        assert_eq!(tokens[0].0, Token::new(Symbol::Integer, 0, 1));
        assert_eq!(tokens[1].0, Token::new(Symbol::Upto, 1, 3));
        assert_eq!(tokens[2].0, Token::new(Symbol::Integer, 3, 4));
        assert_eq!(tokens[2].1, "5");
    }

    #[test]
    fn character_literals() {
        for text in ["0AX", "41X", "'a'"] {
            let tokens = scan_all(text);
            let expected = Token::new(Symbol::Character, 0, text.len() as u32);
            assert_eq!(tokens[0].0, expected, "{}", text);
            assert_eq!(tokens[0].1, text);
        }
    }

    #[test]
    fn strings() {
        for text in ["\"\"", "\"a\"", "\"hello world\"", "''", "'ab'", "\\\"a\\nb\\\""] {
            let tokens = scan_all(text);
            let expected = Token::new(Symbol::String, 0, text.chars().count() as u32);
            assert_eq!(tokens[0].0, expected, "{}", text);
            assert_eq!(tokens[0].1, text);
            assert_eq!(tokens[1].0.kind, Symbol::EndOfFile);
        }
    }

    #[test]
    fn unterminated_string() {
        let mut scanner = scanner("x := \"abc");
        scanner.next_token();
        scanner.next_token();
        assert_eq!(scanner.next_token(), Token::new(Symbol::String, 5, 9));
        assert_eq!(scanner.collected_text().iter().collect::<String>(), "\"abc");
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 9, 9));
        assert_eq!(scanner.issues().len(), 1);
        assert_eq!(scanner.issues()[0].kind, LexerDiagnosticKind::UnterminatedString);
    }

    #[test]
    fn malformed_numbers() {
        for text in ["12AF", "0x", "0b2", "1``2", "1.5E"] {
            let mut scanner = scanner(text);
            let token = scanner.next_token();
            assert!(matches!(token.kind, Symbol::Integer | Symbol::Real), "{}", text);
            assert_eq!(scanner.issues().len(), 1, "{}", text);
            assert_eq!(scanner.issues()[0].kind, LexerDiagnosticKind::MalformedNumber);
        }
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = scan_all("(* one *) a (* nested (* deeper *) still *) b(**)");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, Token::new(Symbol::Ident, 10, 11));
        assert_eq!(tokens[1].0, Token::new(Symbol::Ident, 44, 45));
        assert_eq!(tokens[2].0, Token::new(Symbol::EndOfFile, 49, 49));
    }

    #[test]
    fn unterminated_comment() {
        let mut scanner = scanner("a (* (* *)");
        assert_eq!(scanner.next_token().kind, Symbol::Ident);
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 10, 10));
        assert_eq!(scanner.issues()[0].kind, LexerDiagnosticKind::UnterminatedComment);
    }

    #[test]
    fn paren_without_star_is_not_a_comment() {
        let kinds: Vec<Symbol> = scan_all("( *)").iter().map(|(t, _)| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Symbol::LeftParen, Symbol::Times, Symbol::RightParen, Symbol::EndOfFile]
        );
    }

    #[test]
    fn unknown_character_ends_stream() {
        let mut scanner = scanner("a $b");
        assert_eq!(scanner.next_token(), Token::new(Symbol::Ident, 0, 1));
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 2, 2));
        // The scanner doesn't move past the bad character.
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 2, 2));
        assert_eq!(scanner.issues()[0].kind, LexerDiagnosticKind::UnknownCharacter);
    }

    #[test]
    fn invalid_utf8_placeholder() {
        let mut scanner = scanner("x\u{fffd}");
        scanner.next_token();
        assert_eq!(scanner.next_token(), Token::new(Symbol::EndOfFile, 1, 1));
        assert_eq!(scanner.issues()[0].kind, LexerDiagnosticKind::InvalidUtf8);
    }

    #[test]
    fn inline_assembler_after_code() {
        let text = "CODE\n  MOV EAX, 1\n  PUSH EAX  \nEND x";
        let tokens = scan_all(text);
        assert_eq!(tokens[0].0, Token::new(Symbol::Code, 0, 4));
        assert_eq!(tokens[1].0.kind, Symbol::InlineAssembler);
        assert_eq!(tokens[1].1, "MOV EAX, 1\n  PUSH EAX");
        assert_eq!(tokens[1].0, Token::new(Symbol::InlineAssembler, 7, 28));
        assert_eq!(tokens[2].0, Token::new(Symbol::End, 31, 34));
        assert_eq!(tokens[3].0.kind, Symbol::Ident);
    }

    #[test]
    fn inline_assembler_end_must_be_a_word() {
        let tokens = scan_all("CODE SENDER; ENDX END");
        assert_eq!(tokens[1].1, "SENDER; ENDX");
        assert_eq!(tokens[2].0.kind, Symbol::End);
    }

    #[test]
    fn empty_inline_assembler() {
        let tokens = scan_all("CODE END");
        assert_eq!(tokens[1].0, Token::new(Symbol::InlineAssembler, 5, 5));
        assert_eq!(tokens[1].1, "");
        assert_eq!(tokens[2].0, Token::new(Symbol::End, 5, 8));
    }
}
