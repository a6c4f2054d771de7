use crate::constant::*;
use crate::matcher::model::*;
use crate::model::{ArgumentMode, LongMatch, ScanPolicy, Unrecognized};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Resolves flags against the registered options, in registration order.
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    short_flags: Vec<(char, usize)>,
    long_flags: Vec<(String, usize)>,
    modes: Vec<ArgumentMode>,
    policy: ScanPolicy,
}

impl TokenMatcher {
    pub(crate) fn new(options: Vec<OptionConfig>, policy: ScanPolicy) -> Self {
        let mut short_flags = Vec::default();
        let mut long_flags = Vec::default();
        let mut modes = Vec::with_capacity(options.len());

        for (index, option_config) in options.into_iter().enumerate() {
            for flag in option_config.flags() {
                let mut characters = flag.chars();

                match (characters.next(), characters.next()) {
                    (None, _) => {
                        // An empty flag can never be spelled on the command line.
                    }
                    (Some(single), None) => short_flags.push((single, index)),
                    (Some(_), Some(_)) => long_flags.push((flag.clone(), index)),
                }
            }

            modes.push(option_config.mode());
        }

        Self {
            short_flags,
            long_flags,
            modes,
            policy,
        }
    }

    /// Walk the tokens left to right, yielding one event per matched option or positional token.
    pub(crate) fn scan<'t>(&'t self, tokens: &'t [&'t str]) -> Scanner<'t> {
        Scanner {
            matcher: self,
            tokens,
            position: 0,
            looking_for_options: true,
            cluster: None,
        }
    }

    fn find_short(&self, single: char) -> Option<usize> {
        // First registered wins.
        self.short_flags
            .iter()
            .find(|(flag, _)| *flag == single)
            .map(|(_, index)| *index)
    }

    fn find_long(&self, name: &str) -> Result<Option<(usize, &str)>, MatchError> {
        if name.is_empty() {
            return Ok(None);
        }

        if let Some((flag, index)) = self.long_flags.iter().find(|(flag, _)| flag == name) {
            return Ok(Some((*index, flag.as_str())));
        }

        match self.policy.long_matching() {
            LongMatch::Exact => Ok(None),
            // The first registered flag which the name starts with (`--verbosely` finds `verbose`).
            LongMatch::Permissive => Ok(self
                .long_flags
                .iter()
                .find(|(flag, _)| name.starts_with(flag.as_str()))
                .map(|(flag, index)| (*index, flag.as_str()))),
            LongMatch::Unambiguous => {
                let candidates: Vec<(usize, &str)> = self
                    .long_flags
                    .iter()
                    .filter(|(flag, _)| flag.starts_with(name))
                    .map(|(flag, index)| (*index, flag.as_str()))
                    .collect();

                match candidates.first() {
                    None => Ok(None),
                    Some(&(index, flag)) => {
                        if candidates.iter().all(|(other, _)| *other == index) {
                            Ok(Some((index, flag)))
                        } else {
                            Err(MatchError::AmbiguousOption {
                                name: name.to_string(),
                                candidates: candidates
                                    .iter()
                                    .map(|(_, flag)| format!("{LONG_PREFIX}{flag}"))
                                    .collect(),
                            })
                        }
                    }
                }
            }
        }
    }
}

// A short option token part way through being walked.
#[derive(Debug, Clone, Copy)]
struct Cluster {
    token: usize,
    // Byte offset of the next character to match.
    offset: usize,
}

/// The scanning state machine over one token sequence.
///
/// Yields `Err` at most once, after which the scan is over.
pub(crate) struct Scanner<'t> {
    matcher: &'t TokenMatcher,
    tokens: &'t [&'t str],
    position: usize,
    looking_for_options: bool,
    cluster: Option<Cluster>,
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Result<Event, LocatedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cluster) = self.cluster.take() {
                match self.match_short(cluster) {
                    Some(item) => return Some(self.finish(item)),
                    None => continue,
                }
            }

            let index = self.position;
            let token = *self.tokens.get(index)?;
            self.position += 1;

            if !self.looking_for_options {
                return Some(Ok(Event::Positional(token.to_string())));
            }

            // An empty token terminates exactly like '--'.
            if token.is_empty() || token == TERMINATOR {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Terminator '{token}' at {index}; the remaining tokens are positional.");
                }

                self.looking_for_options = false;
                continue;
            }

            // Find a 'long' flag, such as:
            //  --initial
            //  --initial ..
            //  --initial=..
            //  --init (abbreviated, subject to the LongMatch policy)
            if let Some(text) = token.strip_prefix(LONG_PREFIX) {
                match self.match_long(index, text) {
                    Some(item) => return Some(self.finish(item)),
                    None => continue,
                }
            }

            // Find 'short' flag(s), such as (both -i and -v are example short flags):
            //  -i
            //  -i..
            //  -i ..
            //  -iv..
            //  -iv ..
            if token.len() > SHORT_PREFIX.len() && token.starts_with(SHORT_PREFIX) {
                self.cluster = Some(Cluster {
                    token: index,
                    offset: SHORT_PREFIX.len(),
                });
                continue;
            }

            // Strict POSIX ordering: the first operand ends option recognition.
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Operand '{token}' at {index}; the remaining tokens are positional.");
            }

            self.looking_for_options = false;
            return Some(Ok(Event::Positional(token.to_string())));
        }
    }
}

impl<'t> Scanner<'t> {
    fn finish(&mut self, item: Result<Event, LocatedError>) -> Result<Event, LocatedError> {
        if item.is_err() {
            self.position = self.tokens.len();
            self.cluster = None;
        }

        item
    }

    fn match_short(&mut self, cluster: Cluster) -> Option<Result<Event, LocatedError>> {
        let token = self.tokens[cluster.token];
        let single = token[cluster.offset..].chars().next()?;
        let offset = cluster.offset + single.len_utf8();
        let remaining = &token[offset..];

        let option = match self.matcher.find_short(single) {
            Some(option) => option,
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Short option '{single}' in '{token}' is unrecognized.");
                }

                return match self.matcher.policy.unrecognized_handling() {
                    Unrecognized::Skip => {
                        self.continue_cluster(cluster.token, offset);
                        None
                    }
                    Unrecognized::Reject => Some(Err((
                        cluster.token,
                        MatchError::UnknownShortOption(single),
                    ))),
                };
            }
        };

        let value = match self.matcher.modes[option] {
            ArgumentMode::NoArgument => {
                self.continue_cluster(cluster.token, offset);
                TRUE_VALUE.to_string()
            }
            ArgumentMode::ArgumentRequired => {
                // Can be like "-[opts]o value" or "-[opts]ovalue".
                if remaining.is_empty() {
                    match self.tokens.get(self.position) {
                        Some(next) if !next.starts_with(SHORT_PREFIX) => {
                            self.position += 1;
                            next.to_string()
                        }
                        _ => {
                            return Some(Err((
                                cluster.token,
                                MatchError::MissingArgument {
                                    flag: format!("{SHORT_PREFIX}{single}"),
                                },
                            )));
                        }
                    }
                } else {
                    remaining.to_string()
                }
            }
            ArgumentMode::ArgumentOptional => {
                if remaining.is_empty() {
                    self.take_optional()
                } else {
                    remaining.to_string()
                }
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Short option '{single}' matched option #{option} with '{value}'.");
        }

        Some(Ok(Event::Matched {
            option,
            token: cluster.token,
            value,
        }))
    }

    fn continue_cluster(&mut self, token: usize, offset: usize) {
        if offset < self.tokens[token].len() {
            self.cluster = Some(Cluster { token, offset });
        }
    }

    fn match_long(&mut self, index: usize, text: &str) -> Option<Result<Event, LocatedError>> {
        let (name, inline) = match text.split_once(VALUE_DELIMITER) {
            Some((name, value)) => (name, Some(value)),
            None => (text, None),
        };

        let matcher = self.matcher;
        let (option, flag) = match matcher.find_long(name) {
            Ok(Some(found)) => found,
            Ok(None) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Long option '{name}' is unrecognized.");
                }

                return match matcher.policy.unrecognized_handling() {
                    Unrecognized::Skip => None,
                    Unrecognized::Reject => {
                        Some(Err((index, MatchError::UnknownOption(name.to_string()))))
                    }
                };
            }
            Err(error) => return Some(Err((index, error))),
        };

        let value = match matcher.modes[option] {
            // An inline value given to a switch is ignored.
            ArgumentMode::NoArgument => TRUE_VALUE.to_string(),
            ArgumentMode::ArgumentRequired => match inline {
                Some(value) if !value.is_empty() => value.to_string(),
                Some(_) => {
                    return Some(Err((
                        index,
                        MatchError::MissingArgument {
                            flag: format!("{LONG_PREFIX}{flag}"),
                        },
                    )));
                }
                None => match self.tokens.get(self.position) {
                    Some(next) => {
                        self.position += 1;
                        next.to_string()
                    }
                    None => {
                        return Some(Err((
                            index,
                            MatchError::MissingArgument {
                                flag: format!("{LONG_PREFIX}{flag}"),
                            },
                        )));
                    }
                },
            },
            ArgumentMode::ArgumentOptional => match inline {
                Some(value) => value.to_string(),
                None => self.take_optional(),
            },
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Long option '{name}' matched option #{option} with '{value}'.");
        }

        Some(Ok(Event::Matched {
            option,
            token: index,
            value,
        }))
    }

    // The next token is an optional value only when it cannot be mistaken for a flag or terminator.
    fn take_optional(&mut self) -> String {
        match self.tokens.get(self.position) {
            Some(next) if !next.is_empty() && !next.starts_with(SHORT_PREFIX) => {
                self.position += 1;
                next.to_string()
            }
            _ => String::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn config(flags: &[&str], mode: ArgumentMode) -> OptionConfig {
        OptionConfig::new(flags.iter().map(|f| f.to_string()).collect(), mode)
    }

    // -b/--boolean, -s/--string, -o/--optional
    fn standard() -> TokenMatcher {
        TokenMatcher::new(
            vec![
                config(&["b", "boolean"], ArgumentMode::NoArgument),
                config(&["s", "string"], ArgumentMode::ArgumentRequired),
                config(&["o", "optional"], ArgumentMode::ArgumentOptional),
            ],
            ScanPolicy::default(),
        )
    }

    fn collect(matcher: &TokenMatcher, tokens: &[&str]) -> Result<Vec<Event>, LocatedError> {
        matcher.scan(tokens).collect()
    }

    #[test]
    fn scan_empty() {
        let matcher = standard();
        assert_eq!(collect(&matcher, &[]).unwrap(), vec![]);
    }

    #[rstest]
    #[case(vec!["-b"], vec![Event::matched(0, 0, "true")])]
    #[case(vec!["--boolean"], vec![Event::matched(0, 0, "true")])]
    #[case(vec!["--boolean=false"], vec![Event::matched(0, 0, "true")])]
    #[case(vec!["-s", "hello"], vec![Event::matched(1, 0, "hello")])]
    #[case(vec!["-shello"], vec![Event::matched(1, 0, "hello")])]
    #[case(vec!["-s=hello"], vec![Event::matched(1, 0, "=hello")])]
    #[case(vec!["--string", "hello"], vec![Event::matched(1, 0, "hello")])]
    #[case(vec!["--string=hello"], vec![Event::matched(1, 0, "hello")])]
    #[case(vec!["--string=a=b"], vec![Event::matched(1, 0, "a=b")])]
    #[case(vec!["--string", "-b"], vec![Event::matched(1, 0, "-b")])]
    #[case(vec!["--string", ""], vec![Event::matched(1, 0, "")])]
    fn scan_single(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        let matcher = standard();
        assert_eq!(collect(&matcher, tokens.as_slice()).unwrap(), expected);
    }

    #[rstest]
    #[case(vec!["-bs", "hello"], vec![Event::matched(0, 0, "true"), Event::matched(1, 0, "hello")])]
    #[case(vec!["-bshello"], vec![Event::matched(0, 0, "true"), Event::matched(1, 0, "hello")])]
    #[case(vec!["-sbb"], vec![Event::matched(1, 0, "bb")])]
    #[case(vec!["-bb"], vec![Event::matched(0, 0, "true"), Event::matched(0, 0, "true")])]
    #[case(vec!["-bob"], vec![Event::matched(0, 0, "true"), Event::matched(2, 0, "b")])]
    fn scan_cluster(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        let matcher = standard();
        assert_eq!(collect(&matcher, tokens.as_slice()).unwrap(), expected);
    }

    #[rstest]
    #[case(vec!["-o"], "", 1)]
    #[case(vec!["-ovalue"], "value", 1)]
    #[case(vec!["-o", "value"], "value", 1)]
    #[case(vec!["-o", "-b"], "", 2)]
    #[case(vec!["-o", ""], "", 1)]
    #[case(vec!["--optional"], "", 1)]
    #[case(vec!["--optional="], "", 1)]
    #[case(vec!["--optional=value"], "value", 1)]
    #[case(vec!["--optional", "value"], "value", 1)]
    #[case(vec!["--optional", "--boolean"], "", 2)]
    fn scan_optional(#[case] tokens: Vec<&str>, #[case] expected: &str, #[case] events: usize) {
        let matcher = standard();
        let result = collect(&matcher, tokens.as_slice()).unwrap();
        assert_eq!(result.len(), events);
        assert_eq!(result[0], Event::matched(2, 0, expected));
    }

    #[rstest]
    #[case(vec!["-s"], 0, "-s")]
    #[case(vec!["-s", "-b"], 0, "-s")]
    #[case(vec!["-b", "-bs"], 1, "-s")]
    #[case(vec!["--string"], 0, "--string")]
    #[case(vec!["--string="], 0, "--string")]
    #[case(vec!["-b", "--str"], 1, "--string")]
    fn scan_missing_argument(#[case] tokens: Vec<&str>, #[case] offset: usize, #[case] flag: &str) {
        let matcher = standard();
        let (token, error) = collect(&matcher, tokens.as_slice()).unwrap_err();
        assert_eq!(token, offset);
        assert_eq!(
            error,
            MatchError::MissingArgument {
                flag: flag.to_string()
            }
        );
    }

    #[test]
    fn scan_error_ends_scan() {
        let matcher = standard();
        let mut scanner = matcher.scan(&["-b", "-s"]);
        assert_eq!(scanner.next(), Some(Ok(Event::matched(0, 0, "true"))));
        assert_matches!(scanner.next(), Some(Err((1, MatchError::MissingArgument { .. }))));
        assert_eq!(scanner.next(), None);
    }

    #[rstest]
    #[case(vec!["first", "--boolean"], vec!["first", "--boolean"])]
    #[case(vec!["first", "-b", "-s"], vec!["first", "-b", "-s"])]
    #[case(vec!["first", "--", "-b"], vec!["first", "--", "-b"])]
    #[case(vec!["first", "", "x"], vec!["first", "", "x"])]
    #[case(vec!["--", "-b", "x"], vec!["-b", "x"])]
    #[case(vec!["--", "--", "x"], vec!["--", "x"])]
    #[case(vec!["", "-b", "x"], vec!["-b", "x"])]
    #[case(vec!["-", "-b"], vec!["-", "-b"])]
    fn scan_positional(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let matcher = standard();
        assert_eq!(
            collect(&matcher, tokens.as_slice()).unwrap(),
            expected
                .into_iter()
                .map(Event::positional)
                .collect::<Vec<Event>>()
        );
    }

    #[test]
    fn scan_mixed() {
        let matcher = standard();
        let tokens = vec!["-b", "-s", "hello", "world", "-b"];
        assert_eq!(
            collect(&matcher, tokens.as_slice()).unwrap(),
            vec![
                Event::matched(0, 0, "true"),
                Event::matched(1, 1, "hello"),
                Event::positional("world"),
                Event::positional("-b"),
            ]
        );
    }

    #[rstest]
    #[case(vec!["-x"], vec![])]
    #[case(vec!["-xb"], vec![Event::matched(0, 0, "true")])]
    #[case(vec!["-bx"], vec![Event::matched(0, 0, "true")])]
    #[case(vec!["--moot", "-b"], vec![Event::matched(0, 1, "true")])]
    #[case(vec!["--moot=1", "x"], vec![Event::positional("x")])]
    fn scan_unrecognized_skip(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        let matcher = standard();
        assert_eq!(collect(&matcher, tokens.as_slice()).unwrap(), expected);
    }

    #[rstest]
    #[case(vec!["-x"], 0, MatchError::UnknownShortOption('x'))]
    #[case(vec!["-b", "-bx"], 1, MatchError::UnknownShortOption('x'))]
    #[case(vec!["--moot"], 0, MatchError::UnknownOption("moot".to_string()))]
    #[case(vec!["--moot=1"], 0, MatchError::UnknownOption("moot".to_string()))]
    fn scan_unrecognized_reject(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] expected: MatchError,
    ) {
        let matcher = TokenMatcher::new(
            vec![config(&["b", "boolean"], ArgumentMode::NoArgument)],
            ScanPolicy::default().unrecognized(Unrecognized::Reject),
        );
        assert_eq!(
            collect(&matcher, tokens.as_slice()).unwrap_err(),
            (offset, expected)
        );
    }

    #[test]
    fn scan_short_first_registered_wins() {
        for _ in 0..100 {
            let mode: ArgumentMode = thread_rng().gen();
            let matcher = TokenMatcher::new(
                vec![
                    config(&["f", "first"], ArgumentMode::NoArgument),
                    config(&["f", "second"], mode),
                ],
                ScanPolicy::default(),
            );
            assert_eq!(
                collect(&matcher, &["-f"]).unwrap(),
                vec![Event::matched(0, 0, "true")]
            );
        }
    }

    #[test]
    fn scan_long_first_registered_wins() {
        let matcher = TokenMatcher::new(
            vec![
                config(&["flag"], ArgumentMode::NoArgument),
                config(&["flag"], ArgumentMode::ArgumentRequired),
            ],
            ScanPolicy::default(),
        );
        assert_eq!(
            collect(&matcher, &["--flag"]).unwrap(),
            vec![Event::matched(0, 0, "true")]
        );
    }

    fn prefixed(long_match: LongMatch) -> TokenMatcher {
        TokenMatcher::new(
            vec![
                config(&["string"], ArgumentMode::ArgumentRequired),
                config(&["strict"], ArgumentMode::NoArgument),
                config(&["verbose", "verbosity"], ArgumentMode::NoArgument),
                config(&["str"], ArgumentMode::ArgumentOptional),
            ],
            ScanPolicy::default().long_match(long_match),
        )
    }

    #[rstest]
    #[case(LongMatch::Exact, vec!["--string=a"], vec![Event::matched(0, 0, "a")])]
    #[case(LongMatch::Exact, vec!["--stri"], vec![])]
    #[case(LongMatch::Exact, vec!["--str"], vec![Event::matched(3, 0, "")])]
    #[case(LongMatch::Unambiguous, vec!["--str"], vec![Event::matched(3, 0, "")])]
    #[case(LongMatch::Unambiguous, vec!["--strin", "a"], vec![Event::matched(0, 0, "a")])]
    #[case(LongMatch::Unambiguous, vec!["--stric"], vec![Event::matched(1, 0, "true")])]
    #[case(LongMatch::Unambiguous, vec!["--verb"], vec![Event::matched(2, 0, "true")])]
    #[case(LongMatch::Unambiguous, vec!["--xyz"], vec![])]
    #[case(LongMatch::Permissive, vec!["--verbosely"], vec![Event::matched(2, 0, "true")])]
    #[case(LongMatch::Permissive, vec!["--verb"], vec![])]
    #[case(LongMatch::Permissive, vec!["--st"], vec![])]
    #[case(LongMatch::Permissive, vec!["--stringy", "a"], vec![Event::matched(0, 0, "a")])]
    #[case(LongMatch::Permissive, vec!["--strx=a"], vec![Event::matched(3, 0, "a")])]
    #[case(LongMatch::Permissive, vec!["--strict"], vec![Event::matched(1, 0, "true")])]
    fn scan_long_match(
        #[case] long_match: LongMatch,
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<Event>,
    ) {
        let matcher = prefixed(long_match);
        assert_eq!(collect(&matcher, tokens.as_slice()).unwrap(), expected);
    }

    #[test]
    fn scan_long_ambiguous() {
        let matcher = prefixed(LongMatch::Unambiguous);
        assert_eq!(
            collect(&matcher, &["--stri"]).unwrap_err(),
            (
                0,
                MatchError::AmbiguousOption {
                    name: "stri".to_string(),
                    candidates: vec!["--string".to_string(), "--strict".to_string()],
                }
            )
        );
    }

    #[test]
    fn scan_unicode_cluster() {
        let matcher = TokenMatcher::new(
            vec![
                config(&["é"], ArgumentMode::NoArgument),
                config(&["ß"], ArgumentMode::ArgumentRequired),
            ],
            ScanPolicy::default(),
        );
        assert_eq!(
            collect(&matcher, &["-éßwert"]).unwrap(),
            vec![Event::matched(0, 0, "true"), Event::matched(1, 0, "wert")]
        );
    }

    #[test]
    fn matcher_ignores_empty_flags() {
        let matcher = TokenMatcher::new(
            vec![config(&["", "b"], ArgumentMode::NoArgument)],
            ScanPolicy::default().unrecognized(Unrecognized::Reject),
        );
        assert_eq!(
            collect(&matcher, &["-b"]).unwrap(),
            vec![Event::matched(0, 0, "true")]
        );
        assert_eq!(
            collect(&matcher, &["--=1"]).unwrap_err(),
            (0, MatchError::UnknownOption("".to_string()))
        );
    }
}
