// Free-text and field-targeted search.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    All,
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchKind {
    fn path(self) -> &'static str {
        match self {
            Self::All | Self::Track => "search",
            Self::Artist => "search/artist",
            Self::Album => "search/album",
            Self::Playlist => "search/playlist",
        }
    }

    // Records without a `type` field are tagged as this kind.
    fn record_kind(self) -> &'static str {
        match self {
            Self::All | Self::Track => "track",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Playlist => "playlist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Ranking,
    TrackAsc,
    TrackDesc,
    ArtistAsc,
    ArtistDesc,
    AlbumAsc,
    AlbumDesc,
    RatingAsc,
    RatingDesc,
    DurationAsc,
    DurationDesc,
}

impl SearchOrder {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Ranking => "RANKING",
            Self::TrackAsc => "TRACK_ASC",
            Self::TrackDesc => "TRACK_DESC",
            Self::ArtistAsc => "ARTIST_ASC",
            Self::ArtistDesc => "ARTIST_DESC",
            Self::AlbumAsc => "ALBUM_ASC",
            Self::AlbumDesc => "ALBUM_DESC",
            Self::RatingAsc => "RATING_ASC",
            Self::RatingDesc => "RATING_DESC",
            Self::DurationAsc => "DURATION_ASC",
            Self::DurationDesc => "DURATION_DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub kind: SearchKind,
    pub strict: bool,
    pub order: SearchOrder,
    pub limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            kind: SearchKind::All,
            strict: false,
            order: SearchOrder::Ranking,
            limit: 25,
        }
    }
}

impl SearchOptions {
    pub fn with_kind(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Field-targeted query terms. Text fields become `field:"value"`, numeric
/// bounds become `field:N`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvancedSearchCriteria {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub label: Option<String>,
    pub dur_min: Option<u32>,
    pub dur_max: Option<u32>,
    pub bpm_min: Option<u32>,
    pub bpm_max: Option<u32>,
}

impl AdvancedSearchCriteria {
    pub fn to_query(&self) -> Option<String> {
        let mut parts = Vec::new();
        let quoted = [
            ("artist", &self.artist),
            ("album", &self.album),
            ("track", &self.track),
            ("label", &self.label),
        ];
        for (field, value) in quoted {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                parts.push(format!("{field}:\"{value}\""));
            }
        }
        let bounds = [
            ("dur_min", self.dur_min),
            ("dur_max", self.dur_max),
            ("bpm_min", self.bpm_min),
            ("bpm_max", self.bpm_max),
        ];
        for (field, value) in bounds {
            if let Some(value) = value.filter(|v| *v > 0) {
                parts.push(format!("{field}:{value}"));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl DeezerClient {
    /// Raw search. A blank query yields an empty page without touching the
    /// network.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> CatalogResult<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchPage::default());
        }

        let limit = options.limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("q", query)];
        if options.strict {
            params.push(("strict", "on"));
        }
        if options.order != SearchOrder::Ranking {
            params.push(("order", options.order.as_query_value()));
        }
        params.push(("limit", &limit));

        let json = self.fetch(options.kind.path(), &params).await?;
        Ok(normalize::search_page(&json, options.kind.record_kind()))
    }

    pub async fn search_tracks(&self, query: &str, options: &SearchOptions) -> CatalogResult<Vec<Track>> {
        let options = options.clone().with_kind(SearchKind::Track);
        let page = self.search(query, &options).await?;
        Ok(page.data.into_iter().filter_map(SearchHit::into_track).collect())
    }

    pub async fn search_artists(&self, query: &str, options: &SearchOptions) -> CatalogResult<Vec<Artist>> {
        let options = options.clone().with_kind(SearchKind::Artist);
        let page = self.search(query, &options).await?;
        Ok(page.data.into_iter().filter_map(SearchHit::into_artist).collect())
    }

    pub async fn search_albums(&self, query: &str, options: &SearchOptions) -> CatalogResult<Vec<Album>> {
        let options = options.clone().with_kind(SearchKind::Album);
        let page = self.search(query, &options).await?;
        Ok(page.data.into_iter().filter_map(SearchHit::into_album).collect())
    }

    pub async fn search_playlists(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> CatalogResult<Vec<Playlist>> {
        let options = options.clone().with_kind(SearchKind::Playlist);
        let page = self.search(query, &options).await?;
        Ok(page
            .data
            .into_iter()
            .filter_map(SearchHit::into_playlist)
            .collect())
    }

    pub async fn advanced_search(
        &self,
        criteria: &AdvancedSearchCriteria,
        options: &SearchOptions,
    ) -> CatalogResult<SearchPage> {
        let query = criteria
            .to_query()
            .ok_or(CatalogError::MissingArgument("criteria"))?;
        self.search(&query, options).await
    }
}
