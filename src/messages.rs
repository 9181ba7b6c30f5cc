//! User-facing Portuguese copy.

pub const LOGIN_SUCCESS: &str = "Login realizado com sucesso!";
pub const LOGIN_FAILED: &str = "Erro ao fazer login: ";
pub const EMAIL_NOT_CONFIRMED: &str =
    "Email não confirmado. Verifique sua caixa de entrada e clique no link de confirmação.";
pub const PASSWORD_MISMATCH: &str = "As senhas não coincidem";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 6 caracteres";
pub const SIGN_UP_FAILED: &str = "Erro ao criar conta: ";
pub const SIGN_UP_CONFIRM_EMAIL: &str =
    "Conta criada! Verifique seu email para confirmar antes de fazer login.";
pub const SIGN_UP_SUCCESS: &str = "Conta criada com sucesso!";
pub const SIGN_OUT_FAILED: &str = "Erro ao sair: ";
pub const UNEXPECTED: &str = "Erro inesperado: ";

pub const PAGE_LOAD_FAILED: &str = "Erro ao carregar a página";
pub const ERROR_TITLE: &str = "Erro";

pub const LOCATION_ADDED: &str = "Local adicionado com sucesso!";
pub const LOCATION_ADD_FAILED: &str = "Erro ao adicionar local: ";
pub const LOCATION_NAME_REQUIRED: &str = "Informe o nome do local";

pub const RATING_SAVED: &str = "Avaliação salva com sucesso!";
pub const RATING_SAVE_FAILED: &str = "Erro ao salvar avaliação: ";
pub const RATING_OUT_OF_RANGE: &str = "A nota deve estar entre 1 e 5";
pub const RATINGS_LOAD_FAILED: &str = "Não foi possível carregar as avaliações.";

pub const PROFILE_UPDATED: &str = "Perfil atualizado com sucesso!";
pub const PROFILE_UPDATE_FAILED: &str = "Erro ao atualizar perfil: ";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado.";
pub const NAME_MISSING: &str = "Nome não informado";
pub const SESSION_EXPIRED: &str = "Sua sessão expirou. Faça login novamente.";

pub const ANONYMOUS_AUTHOR: &str = "Anônimo";

pub const HOME_WELCOME_TITLE: &str = "Bem-vindo ao LocalRate!";
pub const HOME_WELCOME_TEXT: &str = "Descubra, avalie e compartilhe os melhores locais da sua cidade.";
pub const HOME_FEATURED_TITLE: &str = "Locais em destaque";
pub const HOME_NO_LOCATIONS: &str = "Nenhum local cadastrado ainda.";
pub const HOME_LOCATION_COUNT: &str = "Locais cadastrados";
pub const HOME_RATING_COUNT: &str = "Avaliações";
pub const HOME_LOAD_FAILED: &str = "Não foi possível carregar os dados.";

pub const LOCATIONS_LOAD_FAILED: &str = "Não foi possível carregar os locais.";

pub const RANKING_TITLE: &str = " Ranking dos locais";
pub const RANKING_EMPTY: &str = "Nenhum local avaliado ainda.";
pub const RANKING_LOAD_FAILED: &str = "Não foi possível carregar o ranking.";

pub const PROFILE_LOAD_FAILED: &str = "Não foi possível carregar o perfil.";

/// `3 avaliações`
pub fn rating_count(count: usize) -> String {
    format!("{count} avaliações")
}
